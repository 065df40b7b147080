use serde::{Deserialize, Serialize};

/// Language used for condition labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
}

/// Weather condition categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    MainlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    RimeFog,
    DrizzleLight,
    DrizzleModerate,
    DrizzleDense,
    FreezingDrizzleLight,
    FreezingDrizzleDense,
    RainSlight,
    RainModerate,
    RainHeavy,
    FreezingRainLight,
    FreezingRainHeavy,
    SnowSlight,
    SnowModerate,
    SnowHeavy,
    SnowGrains,
    RainShowersSlight,
    RainShowersModerate,
    RainShowersViolent,
    SnowShowersSlight,
    SnowShowersHeavy,
    Thunderstorm,
    ThunderstormSlightHail,
    ThunderstormHeavyHail,
    Unknown,
}

impl WeatherCondition {
    /// Convert WMO weather code to WeatherCondition
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1 => Self::MainlyClear,
            2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 => Self::Fog,
            48 => Self::RimeFog,
            51 => Self::DrizzleLight,
            53 => Self::DrizzleModerate,
            55 => Self::DrizzleDense,
            56 => Self::FreezingDrizzleLight,
            57 => Self::FreezingDrizzleDense,
            61 => Self::RainSlight,
            63 => Self::RainModerate,
            65 => Self::RainHeavy,
            66 => Self::FreezingRainLight,
            67 => Self::FreezingRainHeavy,
            71 => Self::SnowSlight,
            73 => Self::SnowModerate,
            75 => Self::SnowHeavy,
            77 => Self::SnowGrains,
            80 => Self::RainShowersSlight,
            81 => Self::RainShowersModerate,
            82 => Self::RainShowersViolent,
            85 => Self::SnowShowersSlight,
            86 => Self::SnowShowersHeavy,
            95 => Self::Thunderstorm,
            96 => Self::ThunderstormSlightHail,
            99 => Self::ThunderstormHeavyHail,
            _ => Self::Unknown,
        }
    }

    /// Human-readable label in the requested language
    pub fn label(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.label_en(),
            Language::Ru => self.label_ru(),
        }
    }

    fn label_en(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::MainlyClear => "Mainly clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::RimeFog => "Rime fog",
            Self::DrizzleLight => "Drizzle: light",
            Self::DrizzleModerate => "Drizzle: moderate",
            Self::DrizzleDense => "Drizzle: dense",
            Self::FreezingDrizzleLight => "Freezing drizzle: light",
            Self::FreezingDrizzleDense => "Freezing drizzle: dense",
            Self::RainSlight => "Rain: slight",
            Self::RainModerate => "Rain: moderate",
            Self::RainHeavy => "Rain: heavy",
            Self::FreezingRainLight => "Freezing rain: light",
            Self::FreezingRainHeavy => "Freezing rain: heavy",
            Self::SnowSlight => "Snowfall: slight",
            Self::SnowModerate => "Snowfall: moderate",
            Self::SnowHeavy => "Snowfall: heavy",
            Self::SnowGrains => "Snow grains",
            Self::RainShowersSlight => "Rain showers: slight",
            Self::RainShowersModerate => "Rain showers: moderate",
            Self::RainShowersViolent => "Rain showers: violent",
            Self::SnowShowersSlight => "Snow showers: slight",
            Self::SnowShowersHeavy => "Snow showers: heavy",
            Self::Thunderstorm => "Thunderstorm",
            Self::ThunderstormSlightHail => "Thunderstorm with slight hail",
            Self::ThunderstormHeavyHail => "Thunderstorm with heavy hail",
            Self::Unknown => "Unknown",
        }
    }

    fn label_ru(&self) -> &'static str {
        match self {
            Self::Clear => "Ясно",
            Self::MainlyClear => "Преимущественно ясно",
            Self::PartlyCloudy => "Переменная облачность",
            Self::Overcast => "Пасмурно",
            Self::Fog => "Туман",
            Self::RimeFog => "Иней",
            Self::DrizzleLight => "Морось: лёгкая",
            Self::DrizzleModerate => "Морось: умеренная",
            Self::DrizzleDense => "Морось: сильная",
            Self::FreezingDrizzleLight => "Ледяная морось: лёгкая",
            Self::FreezingDrizzleDense => "Ледяная морось: сильная",
            Self::RainSlight => "Дождь: слабый",
            Self::RainModerate => "Дождь: умеренный",
            Self::RainHeavy => "Дождь: сильный",
            Self::FreezingRainLight => "Ледяной дождь: слабый",
            Self::FreezingRainHeavy => "Ледяной дождь: сильный",
            Self::SnowSlight => "Снегопад: слабый",
            Self::SnowModerate => "Снегопад: умеренный",
            Self::SnowHeavy => "Снегопад: сильный",
            Self::SnowGrains => "Снежная крупа",
            Self::RainShowersSlight => "Кратковременный дождь: слабый",
            Self::RainShowersModerate => "Кратковременный дождь: умеренный",
            Self::RainShowersViolent => "Кратковременный дождь: сильный",
            Self::SnowShowersSlight => "Кратковременный снег: слабый",
            Self::SnowShowersHeavy => "Кратковременный снег: сильный",
            Self::Thunderstorm => "Гроза",
            Self::ThunderstormSlightHail => "Гроза: с мелким градом",
            Self::ThunderstormHeavyHail => "Гроза: с крупным градом",
            Self::Unknown => "Неизвестно",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}
