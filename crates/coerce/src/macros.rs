//! Declaration macro for config enums.

/// Selects a variant's display name, defaulting to its identifier.
#[doc(hidden)]
#[macro_export]
macro_rules! __config_enum_name {
	($variant:ident) => {
		stringify!($variant)
	};
	($variant:ident $display:literal) => {
		$display
	};
}

/// Declares a fieldless enum that config attributes can be coerced into.
///
/// This macro generates:
/// - The enum itself, deriving `Debug, Clone, Copy, PartialEq, Eq, Hash`
/// - A [`ConfigEnum`](crate::ConfigEnum) impl whose constant list is in
///   declaration order
/// - A [`ConfigValue`](crate::ConfigValue) impl targeting [`Shape::Enum`](crate::Shape::Enum)
///
/// A variant matches its identifier case-insensitively unless a display name
/// is given with `=> "name"`. Variants are also selectable by zero-based
/// ordinal.
///
/// # Example
///
/// ```ignore
/// config_enum! {
///     pub enum LogLevel {
///         Quiet,
///         Normal,
///         Verbose => "chatty",
///     }
/// }
/// ```
#[macro_export]
macro_rules! config_enum {
	(
		$(#[$meta:meta])*
		$vis:vis enum $name:ident {
			$(
				$(#[$variant_meta:meta])*
				$variant:ident $(=> $display:literal)?
			),* $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		$vis enum $name {
			$(
				$(#[$variant_meta])*
				$variant,
			)*
		}

		impl $crate::ConfigEnum for $name {
			const SHAPE: $crate::EnumShape = $crate::EnumShape {
				name: stringify!($name),
				variants: &[$($crate::__config_enum_name!($variant $($display)?)),*],
			};

			fn ordinal(self) -> usize {
				self as usize
			}

			fn from_ordinal(ordinal: usize) -> Option<Self> {
				const ALL: &[$name] = &[$($name::$variant),*];
				ALL.get(ordinal).copied()
			}
		}

		impl $crate::ConfigValue for $name {
			fn shape() -> $crate::Shape {
				$crate::Shape::Enum(<$name as $crate::ConfigEnum>::SHAPE)
			}

			fn to_value(&self) -> $crate::Value {
				$crate::enum_to_value(*self)
			}

			fn from_value(value: $crate::Value) -> Option<Self> {
				$crate::enum_from_value(value)
			}
		}
	};
}
