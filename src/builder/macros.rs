//! Macros for declaring state types.

/// Generate a state enum and its `State` implementation.
///
/// Each variant is named after its identifier unless a string name is
/// given with `Variant = "name"`.
///
/// # Example
///
/// ```
/// use lifecycle::core::State;
/// use lifecycle::state_enum;
///
/// state_enum! {
///     pub enum OrderState {
///         Received = "received",
///         Shipped = "shipped",
///         Error,
///     }
/// }
///
/// assert_eq!(OrderState::Received.name(), "received");
/// assert_eq!(OrderState::Error.name(), "Error");
/// assert_eq!(OrderState::ALL.len(), 3);
/// ```
#[macro_export]
macro_rules! state_enum {
    (@name $variant:ident $label:literal) => { $label };
    (@name $variant:ident) => { stringify!($variant) };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $label:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every state, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $crate::state_enum!(@name $variant $($label)?)),*
                }
            }
        }
    };
}
