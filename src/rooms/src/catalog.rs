//! 有序房间列表
//!
//! 当前索引始终通过循环回绕保持在有效范围内；空列表上的导航不做任何事。

use std::path::Path;

use error::PortraitError;

use crate::loader::load_rooms;
use crate::reading::RoomReading;

#[derive(Debug, Clone, Default)]
pub struct RoomCatalog {
    rooms: Vec<RoomReading>,
    index: usize,
}

impl RoomCatalog {
    pub fn new(rooms: Vec<RoomReading>) -> Self {
        Self { rooms, index: 0 }
    }

    /// 从 CSV 文件创建
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PortraitError> {
        Ok(Self::new(load_rooms(path)?))
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// 当前房间的索引
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&RoomReading> {
        self.rooms.get(self.index)
    }

    pub fn rooms(&self) -> &[RoomReading] {
        &self.rooms
    }

    /// 下一个房间，末尾回到第一个
    pub fn next(&mut self) -> Option<&RoomReading> {
        if self.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.rooms.len();
        self.current()
    }

    /// 上一个房间，开头回到最后一个
    pub fn previous(&mut self) -> Option<&RoomReading> {
        if self.is_empty() {
            return None;
        }
        let len = self.rooms.len();
        self.index = (self.index + len - 1) % len;
        self.current()
    }

    pub fn first(&mut self) -> Option<&RoomReading> {
        self.select(0)
    }

    pub fn last(&mut self) -> Option<&RoomReading> {
        self.select(self.rooms.len().saturating_sub(1))
    }

    /// 选择第 `index` 个房间，超出末尾时回绕
    pub fn select(&mut self, index: usize) -> Option<&RoomReading> {
        if self.is_empty() {
            return None;
        }
        self.index = index % self.rooms.len();
        self.current()
    }
}
