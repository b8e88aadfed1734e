// Logging shims. With `feature = "tracing"` these forward to `tracing` under
// `LOG_TARGET`; without it the invocation is stripped before expansion.

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

macro_rules! vwarn {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!(target: $crate::LOG_TARGET, $($arg)+);
    };
}
