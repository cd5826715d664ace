//! CSV 数据加载
//!
//! 表头必须包含四个读数列；`Room` 列可选，其余列忽略。
//! 任一读数缺失、不是有限数字或无法解码的行会被跳过并记录警告；
//! 只有表头错误和 IO 错误会使整个加载失败。

use std::fs::File;
use std::io::Read;
use std::path::Path;

use error::PortraitError;
use serde::Deserialize;

use crate::reading::RoomReading;

pub const TEMPERATURE_COLUMN: &str = "Temperature (C)";
pub const LIGHT_COLUMN: &str = "Light Level (Lux)";
pub const SOUND_COLUMN: &str = "Sound Level (dB)";
pub const HUMIDITY_COLUMN: &str = "Humidity (%)";
pub const ROOM_COLUMN: &str = "Room";

const REQUIRED_COLUMNS: [&str; 4] = [
    TEMPERATURE_COLUMN,
    LIGHT_COLUMN,
    SOUND_COLUMN,
    HUMIDITY_COLUMN,
];

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Room", default)]
    room: Option<String>,
    #[serde(rename = "Temperature (C)", deserialize_with = "csv::invalid_option")]
    temperature: Option<f64>,
    #[serde(rename = "Light Level (Lux)", deserialize_with = "csv::invalid_option")]
    light: Option<f64>,
    #[serde(rename = "Sound Level (dB)", deserialize_with = "csv::invalid_option")]
    sound: Option<f64>,
    #[serde(rename = "Humidity (%)", deserialize_with = "csv::invalid_option")]
    humidity: Option<f64>,
}

impl RawRow {
    fn into_reading(self) -> Option<RoomReading> {
        let reading = RoomReading {
            name: self.room.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
            temperature: self.temperature?,
            light: self.light?,
            sound: self.sound?,
            humidity: self.humidity?,
        };
        reading.is_finite().then_some(reading)
    }
}

/// 从文件加载房间读数
pub fn load_rooms(path: impl AsRef<Path>) -> Result<Vec<RoomReading>, PortraitError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_rooms(file, &path.display().to_string())
}

/// 从任意 CSV 输入读取房间数据，`source` 仅用于日志和错误信息
pub fn read_rooms<R: Read>(input: R, source: &str) -> Result<Vec<RoomReading>, PortraitError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.byte_headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column.as_bytes()) {
            return Err(PortraitError::MissingColumn(column.to_string()));
        }
    }

    let mut rooms = Vec::new();
    for (index, record) in reader.byte_records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => {
                log::warn!("{}: skipping unreadable record {}: {}", source, index + 1, e);
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        // 跳过无法解析（包括非 UTF-8）或包含非有限数值的行
        match record.deserialize::<RawRow>(Some(&headers)) {
            Ok(row) => match row.into_reading() {
                Some(reading) => rooms.push(reading),
                None => log::warn!("{}:{}: skipping row with missing readings", source, line),
            },
            Err(e) => log::warn!("{}:{}: skipping malformed row: {}", source, line, e),
        }
    }

    if rooms.is_empty() {
        return Err(PortraitError::EmptyDataset(source.to_string()));
    }

    log::info!("Loaded rooms: {} from {}", rooms.len(), source);
    Ok(rooms)
}
