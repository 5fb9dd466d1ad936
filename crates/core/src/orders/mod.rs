mod error;
mod operations;
mod requests;
mod types;

pub use error::OrderError;
pub use operations::{
    assemble_order_graphs, assemble_product_orders, plan_line_upsert, validate_quantity,
    LineUpsert,
};
pub use requests::{AddLineRequest, CreateOrderRequest};
pub use types::{
    NewOrder, Order, OrderLine, OrderProductAssociation, OrderWithLines, ProductOrderLine,
    ProductWithOrders,
};
