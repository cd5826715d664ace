//! 房间传感器数据
//!
//! - `reading` - 单个房间的四项环境读数
//! - `loader` - 从 CSV 表格加载读数
//! - `catalog` - 有序房间列表与循环选择

pub mod catalog;
pub mod loader;
pub mod reading;

pub use catalog::RoomCatalog;
pub use loader::{load_rooms, read_rooms};
pub use reading::RoomReading;
