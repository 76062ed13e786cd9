//! 浏览器生命周期：启动新浏览器或连接已有浏览器

pub mod connection;
pub mod headless;

pub use connection::connect_to_browser;
pub use headless::launch_browser;
