//! Plain data records stored by the resource actors and carried through checkout.

pub mod coupon;
pub mod money;
pub mod order;
pub mod product;

pub use coupon::*;
pub use money::*;
pub use order::*;
pub use product::*;
