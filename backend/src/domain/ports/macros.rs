//! Helper macro for declaring port error enums.
//!
//! Each variant carries named fields and a display template; the macro
//! derives `thiserror::Error` and emits one snake_case constructor per
//! variant whose parameters accept `impl Into<FieldType>`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $(
                    #[doc = concat!("`", stringify!($field), "` detail.")]
                    $field: $ty
                ),* },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Construct [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;
