pub mod app;
pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models {
    pub mod category;
    pub mod search;
}
pub mod db {
    pub mod admin_repository;
    pub mod category_repository;
    pub mod info_page_repository;
    pub mod models;
}
pub mod seed {
    pub mod admin;
    pub mod info_pages;
}
pub mod storage {
    pub mod client;
    pub mod media;
    pub mod staging;
}
