use nuncio_command::InterruptFlag;
use tracing::warn;

use crate::error::Result;

/// Trips `flag` on Ctrl-C instead of terminating, so the running step fails
/// and the release rolls back. Later interrupts are ignored until rollback
/// has finished.
pub(crate) fn install(flag: &InterruptFlag) -> Result<()> {
    let flag = flag.clone();
    ctrlc::set_handler(move || {
        if flag.is_tripped() {
            warn!("rollback in progress; waiting for it to finish");
        } else {
            warn!("interrupted; stopping the current step and rolling back");
            flag.trip();
        }
    })?;
    Ok(())
}
