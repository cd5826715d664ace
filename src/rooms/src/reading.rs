/// 单个房间的一行环境传感器数据，加载后不再修改
#[derive(Debug, Clone, PartialEq)]
pub struct RoomReading {
    /// 可选的房间名称（来自 `Room` 列）
    pub name: Option<String>,
    /// 温度（°C）
    pub temperature: f64,
    /// 光照（lux）
    pub light: f64,
    /// 声音（dB）
    pub sound: f64,
    /// 湿度（%）
    pub humidity: f64,
}

impl RoomReading {
    pub fn new(temperature: f64, light: f64, sound: f64, humidity: f64) -> Self {
        Self {
            name: None,
            temperature,
            light,
            sound,
            humidity,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 四项读数都是有限数字
    pub fn is_finite(&self) -> bool {
        self.temperature.is_finite()
            && self.light.is_finite()
            && self.sound.is_finite()
            && self.humidity.is_finite()
    }
}
