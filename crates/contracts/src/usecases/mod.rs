pub mod sell_product;
