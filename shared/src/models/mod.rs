//! Catalog and content records
//!
//! Rows are written by the seeding/administration side and only ever read
//! by the storefront. Relations (`categories`, `items`) are populated by the
//! repository after the main row is fetched.

pub mod cart;
pub mod category;
pub mod post;
pub mod product;

pub use cart::{Cart, CartItem};
pub use category::Category;
pub use post::Post;
pub use product::Product;
