pub mod async_ext;
