// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Implement string methods like `as_str()`, plus `Deref<Target = str>`,
/// `Borrow<str>` and `Display`, for string wrapper tuples such as video,
/// user and session IDs.
///
/// # Example
///
/// `pub struct VideoId(pub String);`
/// `impl_wrapper_str!(VideoId);`
#[macro_export]
macro_rules! impl_wrapper_str {
    ($typ:ty) => {
        impl $typ {
            /// Returns `as_str()` of the inner string.
            #[allow(unused)]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $typ {
            fn as_ref(&self) -> &str {
                self.0.as_ref()
            }
        }

        impl std::borrow::Borrow<str> for $typ {
            fn borrow(&self) -> &str {
                self.0.as_str()
            }
        }

        impl std::ops::Deref for $typ {
            type Target = str;
            fn deref(&self) -> &Self::Target {
                &*self.0
            }
        }

        impl std::fmt::Display for $typ {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<&str> for $typ {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl PartialEq<str> for $typ {
            fn eq(&self, other: &str) -> bool {
                self.0.as_str() == other
            }
        }
    };
}
