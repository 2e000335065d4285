//! storefront - order lifecycle service for a small accessories shop.
//!
//! Orders are placed against a product catalog with live stock counts,
//! priced with tax and shipping, cancelled with stock restored, and managed
//! by admins from a back office. Every multi-document change is committed
//! atomically through [`model::Batch`].

pub mod catalog;
pub mod customer;
pub mod handlers;
pub mod microsvc;
pub mod model;
pub mod orders;
pub mod settings;
pub mod telemetry;

pub use catalog::Product;
pub use customer::{Customer, Role};
pub use model::{InMemoryModelStore, ModelError, ModelStore, ModelsExt};
pub use orders::{OrderError, OrderService, Requester};
pub use settings::Settings;
