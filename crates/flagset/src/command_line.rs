//! Optional process-wide default set.
//!
//! Nothing in the library depends on this module; the parser and
//! registry always take an explicit [`FlagSet`]. It exists for binaries
//! that want one shared set for the whole process without threading it
//! through every call site.
//!
//! ```
//! use flagset::{command_line, ErrorHandling, FlagSet};
//!
//! let mut flags = FlagSet::new("myprog", ErrorHandling::Continue);
//! flags.bool("verbose", false, "chatty output").unwrap();
//! command_line::init(flags);
//!
//! command_line::with(|flags| flags.parse(["--verbose"]).map(|_| ()))
//!     .expect("default set installed")
//!     .unwrap();
//! let verbose = command_line::with(|flags| flags.get_bool("verbose").unwrap());
//! assert_eq!(verbose, Some(true));
//! # command_line::teardown();
//! ```

use std::sync::{Mutex, OnceLock, PoisonError};

use crate::set::FlagSet;

static COMMAND_LINE: OnceLock<Mutex<Option<FlagSet>>> = OnceLock::new();

fn slot() -> std::sync::MutexGuard<'static, Option<FlagSet>> {
    COMMAND_LINE
        .get_or_init(|| Mutex::new(None))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Install `set` as the process-wide default, returning any previously
/// installed set.
pub fn init(set: FlagSet) -> Option<FlagSet> {
    slot().replace(set)
}

/// Run `f` against the installed default set, or return `None` if
/// [`init`] has not been called. The set stays locked for the duration
/// of `f`.
pub fn with<T>(f: impl FnOnce(&mut FlagSet) -> T) -> Option<T> {
    slot().as_mut().map(f)
}

/// Remove and return the installed default set.
pub fn teardown() -> Option<FlagSet> {
    slot().take()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::set::ErrorHandling;

    // One test only: the slot is process-global and tests run in parallel.
    #[test]
    fn init_with_teardown_round_trip() {
        assert!(with(|_| ()).is_none());

        let mut fs = FlagSet::new("global", ErrorHandling::Continue);
        fs.i64("jobs", 1, "worker count").unwrap();
        assert!(init(fs).is_none());

        with(|fs| fs.parse(["--jobs=3"]).map(|_| ())).unwrap().unwrap();
        assert_eq!(with(|fs| fs.get_i64("jobs").unwrap()), Some(3));

        let fs = teardown().expect("was installed");
        assert_eq!(fs.get_i64("jobs").unwrap(), 3);
        assert!(with(|_| ()).is_none());
    }
}
