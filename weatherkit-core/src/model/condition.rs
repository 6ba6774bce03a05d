use strum::{EnumIter, EnumMessage, IntoStaticStr};

use crate::vocabulary::Vocabulary;

/// Weather condition reported for a point in time or a forecast period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, EnumMessage)]
pub enum ConditionCode {
    #[strum(message = "Blowing Dust")]
    BlowingDust,
    #[strum(message = "Clear")]
    Clear,
    #[strum(message = "Cloudy")]
    Cloudy,
    #[strum(message = "Foggy")]
    Foggy,
    #[strum(message = "Haze")]
    Haze,
    #[strum(message = "Mostly Clear")]
    MostlyClear,
    #[strum(message = "Mostly Cloudy")]
    MostlyCloudy,
    #[strum(message = "Partly Cloudy")]
    PartlyCloudy,
    #[strum(message = "Smoky")]
    Smoky,
    #[strum(message = "Breezy")]
    Breezy,
    #[strum(message = "Windy")]
    Windy,
    #[strum(message = "Drizzle")]
    Drizzle,
    #[strum(message = "Heavy Rain")]
    HeavyRain,
    #[strum(message = "Isolated Thunderstorms")]
    IsolatedThunderstorms,
    #[strum(message = "Rain")]
    Rain,
    #[strum(message = "Sun Showers")]
    SunShowers,
    #[strum(message = "Scattered Thunderstorms")]
    ScatteredThunderstorms,
    #[strum(message = "Strong Storms")]
    StrongStorms,
    #[strum(message = "Thunderstorms")]
    Thunderstorms,
    #[strum(message = "Frigid")]
    Frigid,
    #[strum(message = "Hail")]
    Hail,
    #[strum(message = "Hot")]
    Hot,
    #[strum(message = "Flurries")]
    Flurries,
    #[strum(message = "Sleet")]
    Sleet,
    #[strum(message = "Snow")]
    Snow,
    #[strum(message = "Sun Flurries")]
    SunFlurries,
    #[strum(message = "Wintry Mix")]
    WintryMix,
    #[strum(message = "Blizzard")]
    Blizzard,
    #[strum(message = "Blowing Snow")]
    BlowingSnow,
    #[strum(message = "Freezing Drizzle")]
    FreezingDrizzle,
    #[strum(message = "Freezing Rain")]
    FreezingRain,
    #[strum(message = "Heavy Snow")]
    HeavySnow,
    #[strum(message = "Hurricane")]
    Hurricane,
    #[strum(message = "Tropical Storm")]
    TropicalStorm,
}

impl Vocabulary for ConditionCode {
    const TYPE_NAME: &'static str = "ConditionCode";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, EnumMessage)]
#[strum(serialize_all = "camelCase")]
pub enum PressureTrend {
    #[strum(message = "Rising")]
    Rising,
    #[strum(message = "Falling")]
    Falling,
    #[strum(message = "Steady")]
    Steady,
}

impl Vocabulary for PressureTrend {
    const TYPE_NAME: &'static str = "PressureTrend";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, EnumMessage)]
#[strum(serialize_all = "camelCase")]
pub enum PrecipitationType {
    #[strum(message = "No precipitation")]
    Clear,
    #[strum(message = "Precipitation")]
    Precipitation,
    #[strum(message = "Rain")]
    Rain,
    #[strum(message = "Snow")]
    Snow,
    #[strum(message = "Sleet")]
    Sleet,
    #[strum(message = "Hail")]
    Hail,
    #[strum(message = "Mixed")]
    Mixed,
}

impl Vocabulary for PrecipitationType {
    const TYPE_NAME: &'static str = "PrecipitationType";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, EnumMessage)]
#[strum(serialize_all = "camelCase")]
pub enum MoonPhase {
    #[strum(message = "New Moon")]
    New,
    #[strum(message = "Waxing Crescent")]
    WaxingCrescent,
    #[strum(message = "First Quarter")]
    FirstQuarter,
    #[strum(message = "Waxing Gibbous")]
    WaxingGibbous,
    #[strum(message = "Full Moon")]
    Full,
    #[strum(message = "Waning Gibbous")]
    WaningGibbous,
    #[strum(message = "Third Quarter")]
    ThirdQuarter,
    #[strum(message = "Waning Crescent")]
    WaningCrescent,
}

impl Vocabulary for MoonPhase {
    const TYPE_NAME: &'static str = "MoonPhase";
}

/// How dangerous an alerted event is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, EnumMessage)]
#[strum(serialize_all = "camelCase")]
pub enum Severity {
    Extreme,
    Severe,
    Moderate,
    Minor,
    Unknown,
}

impl Vocabulary for Severity {
    const TYPE_NAME: &'static str = "Severity";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, EnumMessage)]
#[strum(serialize_all = "camelCase")]
pub enum Urgency {
    Immediate,
    Expected,
    Future,
    Past,
    Unknown,
}

impl Vocabulary for Urgency {
    const TYPE_NAME: &'static str = "Urgency";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, EnumMessage)]
#[strum(serialize_all = "camelCase")]
pub enum Certainty {
    Observed,
    Likely,
    Possible,
    Unlikely,
    Unknown,
}

impl Vocabulary for Certainty {
    const TYPE_NAME: &'static str = "Certainty";
}

/// Recommended action for an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, EnumMessage)]
#[strum(serialize_all = "camelCase")]
pub enum AlertResponse {
    Shelter,
    Evacuate,
    Prepare,
    Execute,
    Avoid,
    Monitor,
    Assess,
    #[strum(message = "All Clear")]
    AllClear,
    #[strum(serialize = "none", message = "No Action")]
    NoAction,
}

impl Vocabulary for AlertResponse {
    const TYPE_NAME: &'static str = "AlertResponse";
}

/// Data set that can be requested from the weather endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, EnumMessage)]
#[strum(serialize_all = "camelCase")]
pub enum DataSet {
    #[strum(message = "Current Weather")]
    CurrentWeather,
    #[strum(message = "Daily Forecast")]
    ForecastDaily,
    #[strum(message = "Hourly Forecast")]
    ForecastHourly,
    #[strum(message = "Next Hour Forecast")]
    ForecastNextHour,
    #[strum(message = "Weather Alerts")]
    WeatherAlerts,
}

impl Vocabulary for DataSet {
    const TYPE_NAME: &'static str = "DataSet";
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn symbols_match_upstream_casing() {
        assert_eq!(ConditionCode::PartlyCloudy.symbol(), "PartlyCloudy");
        assert_eq!(PressureTrend::Steady.symbol(), "steady");
        assert_eq!(MoonPhase::WaxingGibbous.symbol(), "waxingGibbous");
        assert_eq!(DataSet::ForecastNextHour.symbol(), "forecastNextHour");
        assert_eq!(AlertResponse::AllClear.symbol(), "allClear");
    }

    #[test]
    fn labels_fall_back_to_symbol() {
        assert_eq!(Severity::Severe.label(), "severe");
        assert_eq!(AlertResponse::AllClear.label(), "All Clear");
        assert_eq!(MoonPhase::Full.label(), "Full Moon");
    }

    #[test]
    fn every_condition_has_a_label() {
        for code in ConditionCode::iter() {
            assert!(!code.label().is_empty());
        }
    }
}
