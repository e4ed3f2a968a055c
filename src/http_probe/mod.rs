pub mod probe;
pub mod result;

pub mod prelude {
    pub use super::probe::{HttpProber, Prober};
    pub use super::result::ProbeResult;
}

use std::fmt::Write;

/// Render an error together with its chain of sources.
fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, ": {}", src);
        err = src;
    }
    s
}
