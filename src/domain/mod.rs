//! Domain entities, ports, and services.
//!
//! Entities are immutable and strongly typed; invariants and serialisation
//! contracts live in each type's Rustdoc. Services implement the driving
//! ports generically over the driven ports declared in [`ports`].

pub mod error;
pub mod ports;
pub mod pos;
pub mod pos_service;
pub mod reconcile;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode};
pub use self::pos::{CampusType, Pos, PosName, PosValidationError, Position};
pub use self::pos_service::PosCatalogueService;
pub use self::user::{LoginName, User, UserValidationError};
pub use self::user_service::UserDirectoryService;
