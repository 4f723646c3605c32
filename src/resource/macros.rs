//! Declaration macro for typed resources

/// Declares a resource struct and implements [`Resource`], [`BlankConstruct`]
/// and [`FieldValue`] for it.
///
/// A field takes its Rust name as wire name unless renamed with
/// `=> "wireName"`. The struct derives `Debug`, `Clone`, `Default` and `PartialEq`;
/// every field type must implement `FieldValue` and `Default`.
///
/// ```ignore
/// schemacodec::resource! {
///     pub struct Pet {
///         pub name: String,
///         pub kind: String => "type",
///         pub tags: Vec<String>,
///     }
/// }
/// ```
///
/// [`Resource`]: crate::resource::Resource
/// [`BlankConstruct`]: crate::resource::BlankConstruct
/// [`FieldValue`]: crate::resource::FieldValue
#[macro_export]
macro_rules! resource {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $fty:ty $(=> $wire:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $fty,
            )*
        }

        impl $crate::resource::Resource for $name {
            fn field_names(&self) -> ::std::vec::Vec<&str> {
                ::std::vec![$($crate::__wire_name!($field $(, $wire)?)),*]
            }

            fn field(&self, name: &str) -> ::std::option::Option<$crate::resource::Value> {
                $(
                    if name == $crate::__wire_name!($field $(, $wire)?) {
                        return ::std::option::Option::Some(
                            $crate::resource::FieldValue::to_value(&self.$field),
                        );
                    }
                )*
                ::std::option::Option::None
            }

            fn set_field(
                &mut self,
                name: &str,
                value: $crate::resource::Value,
            ) -> ::std::result::Result<(), $crate::resource::FieldError> {
                $(
                    if name == $crate::__wire_name!($field $(, $wire)?) {
                        self.$field = $crate::resource::FieldValue::from_value(value)?;
                        return ::std::result::Result::Ok(());
                    }
                )*
                ::std::result::Result::Err($crate::resource::FieldError::UnknownField(
                    name.to_string(),
                ))
            }

            fn clone_resource(&self) -> ::std::boxed::Box<dyn $crate::resource::Resource> {
                ::std::boxed::Box::new(::std::clone::Clone::clone(self))
            }

            fn eq_resource(&self, other: &dyn $crate::resource::Resource) -> bool {
                other
                    .as_any()
                    .downcast_ref::<Self>()
                    .map_or(false, |other| self == other)
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(
                self: ::std::boxed::Box<Self>,
            ) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }
        }

        impl $crate::resource::BlankConstruct for $name {
            fn blank() -> Self {
                Self {
                    $($field: ::std::default::Default::default(),)*
                }
            }
        }

        impl $crate::resource::FieldValue for $name {
            fn to_value(&self) -> $crate::resource::Value {
                $crate::resource::Value::Object(::std::boxed::Box::new(
                    ::std::clone::Clone::clone(self),
                ))
            }

            fn from_value(
                value: $crate::resource::Value,
            ) -> ::std::result::Result<Self, $crate::resource::FieldError> {
                match value {
                    $crate::resource::Value::Null => {
                        ::std::result::Result::Ok(::std::default::Default::default())
                    }
                    $crate::resource::Value::Object(resource) => resource
                        .into_any()
                        .downcast::<Self>()
                        .map(|boxed| *boxed)
                        .map_err(|_| $crate::resource::FieldError::Mismatch {
                            expected: ::std::any::type_name::<Self>(),
                            found: "object",
                        }),
                    other => ::std::result::Result::Err(
                        $crate::resource::FieldError::mismatch(
                            ::std::any::type_name::<Self>(),
                            &other,
                        ),
                    ),
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __wire_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $wire:literal) => {
        $wire
    };
}
