/// Compiles the enclosed statements only when the `tracing` feature is on.
#[macro_export]
#[doc(hidden)]
macro_rules! cfg_tracing {
    ($($stmt:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            $($stmt)*
        }
    };
}
