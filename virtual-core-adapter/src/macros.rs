// Same shims as the core crate, logging under this crate's target.

macro_rules! vtrace {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!(target: $crate::LOG_TARGET, $($arg)+);
    };
}

macro_rules! vdebug {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(target: $crate::LOG_TARGET, $($arg)+);
    };
}
