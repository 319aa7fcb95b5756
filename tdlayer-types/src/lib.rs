//! TDLib-style protocol objects, requests and results.
//!
//! Every object is declared once against the schema in `tl/td_api.tl`.
//!
//! # Overview
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`types`]     | Concrete constructors as `struct`s                          |
//! | [`functions`] | Requests as `struct`s implementing [`RemoteCall`]          |
//! | [`enums`]     | Boxed types as `enum`s: [`enums::Object`], [`enums::Function`], … |
//! | [`schema`]    | Constructor IDs and the schema text they are derived from  |
//!
//! # Narrowing
//!
//! ```rust
//! use tdlayer_types::{enums, types};
//!
//! let object = enums::Object::Chat(types::Chat {
//!     id: 42,
//!     r#type: enums::ChatType::Supergroup(types::ChatTypeSupergroup { is_channel: true }),
//!     title: "X".into(),
//! });
//!
//! match object {
//!     enums::Object::Chat(chat) => assert!(chat.r#type.is_channel()),
//!     enums::Object::Error(e) => panic!("{}: {}", e.code, e.message),
//!     other => panic!("unexpected {}", other.name()),
//! }
//! ```
//!
//! # Generic handling
//!
//! Every object can be encoded with [`Serializable::to_bytes`] and read back
//! through the boxed enums, which route on the leading constructor ID:
//!
//! ```rust
//! use tdlayer_types::{Deserializable, Serializable, enums, functions};
//!
//! let req = enums::Function::from(functions::GetChat { chat_id: 7 });
//! let back = enums::Function::from_bytes(&req.to_bytes()).unwrap();
//! assert_eq!(back.name(), "getChat");
//! ```

#![deny(unsafe_code)]

#[macro_use]
mod macros;

pub mod deserialize;
pub mod enums;
pub mod functions;
pub mod schema;
pub mod serialize;
pub mod types;

pub use deserialize::{Cursor, Deserializable};
pub use serialize::Serializable;

// ─── Core traits ──────────────────────────────────────────────────────────────

/// Every constructor has a unique 32-bit ID.
pub trait Identifiable {
    /// The constructor ID, see [`schema::tl_id`].
    const CONSTRUCTOR_ID: u32;
}

/// Marks a request type that can be dispatched to the backing service.
///
/// `Return` is the payload a successful call resolves to; the dispatcher
/// narrows the generic [`enums::Object`] into it.
pub trait RemoteCall: Serializable + Clone + Into<enums::Function> {
    /// The narrowed response type.
    type Return: Deserializable + TryFrom<enums::Object, Error = enums::Object>;
}
