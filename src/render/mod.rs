//! 渲染组件
//!
//! - `portrait` - 场景画布（辉光、湿度环、粒子、光束）
//! - `overlay` - 边框、标题、读数文字和无数据提示

pub mod overlay;
pub mod portrait;

pub use overlay::OverlayRenderer;
pub use portrait::PortraitWidget;
