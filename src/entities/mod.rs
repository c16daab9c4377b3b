pub mod addresses;
pub mod cart_items;
pub mod carts;
pub mod categories;
pub mod order_items;
pub mod orders;
pub mod product_images;
pub mod products;
pub mod users;

pub use addresses as address_entity;
pub use cart_items as cart_item_entity;
pub use carts as cart_entity;
pub use categories as category_entity;
pub use order_items as order_item_entity;
pub use orders as order_entity;
pub use product_images as product_image_entity;
pub use products as product_entity;
pub use users as user_entity;
