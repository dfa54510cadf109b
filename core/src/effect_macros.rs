//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use stockroom_core::async_effect;
///
/// async_effect! {
///     match source.fetch_snapshot().await {
///         Ok(snapshot) => Some(OrderAction::SnapshotLoaded { orders: snapshot.orders, items: snapshot.items }),
///         Err(error) => Some(OrderAction::LoadFailed { error: error.to_string() }),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
