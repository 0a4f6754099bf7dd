//! Co-located widget cluster: ordering keys and stepped cursor traversal.
//!
//! - [`side`]: pure ordering keys for widgets sharing one position
//! - [`offset`]: the offset slice, its intents and reducer
//! - [`controller`]: the plugin intercepting moves that start at the anchor

pub mod controller;
pub mod offset;
pub mod side;

pub use controller::{OffsetTraversalController, WidgetCluster, OFFSET_KEY};
pub use offset::{Crossing, OffsetIntent, OffsetState};
pub use side::{compute_side, order_offset, SelectionShape};
