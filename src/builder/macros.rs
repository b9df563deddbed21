//! Macros for ergonomic state machine construction.

/// Generate a state enum and its `State` implementation.
///
/// The enum derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash` and `Debug`;
/// variant names double as state names.
///
/// # Example
///
/// ```
/// use tickbus::state_enum;
/// use tickbus::core::State;
///
/// state_enum! {
///     pub enum RoundState {
///         Warmup,
///         Live,
///         Over,
///     }
///     final: [Over]
/// }
///
/// assert_eq!(RoundState::Live.name(), "Live");
/// assert!(RoundState::Over.is_final());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }
    };
}
