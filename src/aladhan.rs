//! Prayer times and Hijri dates from the aladhan.com API.

use serde::Deserialize;

use crate::error::{MinbarError, Result};

const BASE_URL: &str = "https://api.aladhan.com/v1";

/// Calculation methods the API accepts, id to name. Id 6 is unassigned and
/// 99 is the API's custom-angle entry, which needs parameters we don't take.
pub const CALCULATION_METHODS: &[(u8, &str)] = &[
    (0, "Shia Ithna-Ashari, Leva Institute, Qum"),
    (1, "University of Islamic Sciences, Karachi"),
    (2, "Islamic Society of North America (ISNA)"),
    (3, "Muslim World League"),
    (4, "Umm Al-Qura University, Makkah"),
    (5, "Egyptian General Authority of Survey"),
    (7, "Institute of Geophysics, University of Tehran"),
    (8, "Gulf Region"),
    (9, "Kuwait"),
    (10, "Qatar"),
    (11, "Majlis Ugama Islam Singapura, Singapore"),
    (12, "Union Organization Islamic de France"),
    (13, "Diyanet İşleri Başkanlığı, Turkey"),
    (14, "Spiritual Administration of Muslims of Russia"),
    (15, "Moonsighting Committee Worldwide"),
];

pub fn method_name(id: u8) -> Option<&'static str> {
    CALCULATION_METHODS
        .iter()
        .find(|(method_id, _)| *method_id == id)
        .map(|(_, name)| *name)
}

/// Parse and validate a stored or user-typed method id.
///
/// # Errors
///
/// `InvalidCalculationMethod` when the text is not one of the known ids.
pub fn validate_method(text: &str) -> Result<u8> {
    text.trim()
        .parse::<u8>()
        .ok()
        .filter(|id| method_name(*id).is_some())
        .ok_or_else(|| MinbarError::InvalidCalculationMethod(text.to_string()))
}

/// One day of prayer times for a location.
#[derive(Debug, Clone)]
pub struct PrayerTimes {
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    /// Asr per the Hanafi school, fetched with `school=1`
    pub hanafi_asr: String,
    pub maghrib: String,
    pub isha: String,
    pub imsak: String,
    pub midnight: String,
    pub date: String,
}

#[derive(Debug, Deserialize)]
struct TimingsResponse {
    data: TimingsData,
}

#[derive(Debug, Deserialize)]
struct TimingsData {
    timings: Timings,
    date: DateInfo,
}

#[derive(Debug, Deserialize)]
struct Timings {
    #[serde(rename = "Fajr")]
    fajr: String,
    #[serde(rename = "Sunrise")]
    sunrise: String,
    #[serde(rename = "Dhuhr")]
    dhuhr: String,
    #[serde(rename = "Asr")]
    asr: String,
    #[serde(rename = "Maghrib")]
    maghrib: String,
    #[serde(rename = "Isha")]
    isha: String,
    #[serde(rename = "Imsak")]
    imsak: String,
    #[serde(rename = "Midnight")]
    midnight: String,
}

#[derive(Debug, Deserialize)]
struct DateInfo {
    readable: String,
}

/// Fetch prayer times for a free-form address.
///
/// The API computes Asr per the standard school; a second request with
/// `school=1` supplies the Hanafi time.
///
/// # Errors
///
/// `NotFound` if the API cannot geocode the address,
/// `UpstreamUnavailable`/`Network` on transport failures.
pub async fn fetch_prayer_times(
    client: &reqwest::Client,
    address: &str,
    method: u8,
) -> Result<PrayerTimes> {
    let standard = fetch_timings(client, address, method, 0).await?;
    let hanafi = fetch_timings(client, address, method, 1).await?;

    Ok(PrayerTimes {
        fajr: standard.timings.fajr,
        sunrise: standard.timings.sunrise,
        dhuhr: standard.timings.dhuhr,
        asr: standard.timings.asr,
        hanafi_asr: hanafi.timings.asr,
        maghrib: standard.timings.maghrib,
        isha: standard.timings.isha,
        imsak: standard.timings.imsak,
        midnight: standard.timings.midnight,
        date: standard.date.readable,
    })
}

async fn fetch_timings(
    client: &reqwest::Client,
    address: &str,
    method: u8,
    school: u8,
) -> Result<TimingsData> {
    let resp = client
        .get(format!("{}/timingsByAddress", BASE_URL))
        .query(&[
            ("address", address),
            ("method", &method.to_string()),
            ("school", &school.to_string()),
        ])
        .send()
        .await?;
    let resp = checked(resp, address)?;
    let body: TimingsResponse = resp.json().await?;
    Ok(body.data)
}

/// A Hijri calendar date with both English and Arabic renderings.
#[derive(Debug, Clone)]
pub struct HijriDate {
    pub day: u8,
    pub month_number: u8,
    pub month_en: String,
    pub month_ar: String,
    pub year: u16,
    pub weekday_ar: String,
}

/// A Gregorian date as the API reports it, e.g. "25-08-2026".
#[derive(Debug, Clone)]
pub struct GregorianDate {
    pub date: String,
    pub month_en: String,
    pub day: u8,
    pub year: u16,
}

#[derive(Debug, Deserialize)]
struct ConversionResponse {
    data: ConversionData,
}

#[derive(Debug, Deserialize)]
struct ConversionData {
    hijri: HijriPart,
    gregorian: GregorianPart,
}

#[derive(Debug, Deserialize)]
struct HijriPart {
    day: String,
    month: HijriMonth,
    year: String,
    weekday: Weekday,
}

#[derive(Debug, Deserialize)]
struct HijriMonth {
    number: u8,
    en: String,
    ar: String,
}

#[derive(Debug, Deserialize)]
struct Weekday {
    ar: String,
}

#[derive(Debug, Deserialize)]
struct GregorianPart {
    date: String,
    day: String,
    month: GregorianMonth,
    year: String,
}

#[derive(Debug, Deserialize)]
struct GregorianMonth {
    en: String,
}

/// Convert a Gregorian date (`DD-MM-YYYY`) to Hijri.
///
/// # Errors
///
/// `BadReference` when the API rejects the date text.
pub async fn to_hijri(client: &reqwest::Client, gregorian: &str) -> Result<HijriDate> {
    let resp = client
        .get(format!("{}/gToH", BASE_URL))
        .query(&[("date", gregorian)])
        .send()
        .await?;
    let resp = checked_date(resp, gregorian)?;
    let body: ConversionResponse = resp.json().await?;
    hijri_from_part(body.data.hijri, gregorian)
}

/// Today's Hijri date. The API defaults to the current day when no date is
/// given.
pub async fn today_hijri(client: &reqwest::Client) -> Result<HijriDate> {
    let resp = client.get(format!("{}/gToH", BASE_URL)).send().await?;
    let resp = checked_date(resp, "today")?;
    let body: ConversionResponse = resp.json().await?;
    hijri_from_part(body.data.hijri, "today")
}

/// Convert a Hijri date (`DD-MM-YYYY`) to Gregorian.
///
/// # Errors
///
/// `BadReference` when the API rejects the date text.
pub async fn to_gregorian(client: &reqwest::Client, hijri: &str) -> Result<GregorianDate> {
    let resp = client
        .get(format!("{}/hToG", BASE_URL))
        .query(&[("date", hijri)])
        .send()
        .await?;
    let resp = checked_date(resp, hijri)?;
    let body: ConversionResponse = resp.json().await?;
    let part = body.data.gregorian;
    Ok(GregorianDate {
        day: part
            .day
            .parse()
            .map_err(|_| MinbarError::BadReference(hijri.to_string()))?,
        year: part
            .year
            .parse()
            .map_err(|_| MinbarError::BadReference(hijri.to_string()))?,
        month_en: part.month.en,
        date: part.date,
    })
}

fn hijri_from_part(part: HijriPart, source: &str) -> Result<HijriDate> {
    let bad = || MinbarError::BadReference(source.to_string());
    Ok(HijriDate {
        day: part.day.parse().map_err(|_| bad())?,
        month_number: part.month.number,
        month_en: part.month.en,
        month_ar: part.month.ar,
        year: part.year.parse().map_err(|_| bad())?,
        weekday_ar: part.weekday.ar,
    })
}

fn checked(resp: reqwest::Response, address: &str) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.as_u16() == 404 || status.as_u16() == 400 {
        return Err(MinbarError::NotFound(format!("location '{}'", address)));
    }
    if !status.is_success() {
        return Err(MinbarError::UpstreamUnavailable(format!(
            "aladhan.com returned {}",
            status
        )));
    }
    Ok(resp)
}

fn checked_date(resp: reqwest::Response, date: &str) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.as_u16() == 404 || status.as_u16() == 400 {
        return Err(MinbarError::BadReference(date.to_string()));
    }
    if !status.is_success() {
        return Err(MinbarError::UpstreamUnavailable(format!(
            "aladhan.com returned {}",
            status
        )));
    }
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_name_lookup() {
        assert_eq!(method_name(4), Some("Umm Al-Qura University, Makkah"));
        assert_eq!(method_name(3), Some("Muslim World League"));
        assert_eq!(method_name(6), None);
        assert_eq!(method_name(99), None);
    }

    #[test]
    fn test_validate_method() {
        assert_eq!(validate_method("2").unwrap(), 2);
        assert_eq!(validate_method(" 15 ").unwrap(), 15);
        for bad in ["6", "99", "-1", "abc", ""] {
            assert!(matches!(
                validate_method(bad),
                Err(MinbarError::InvalidCalculationMethod(_))
            ));
        }
    }

    #[test]
    fn test_default_method_is_known() {
        // The stored default for users with no preference row
        assert!(validate_method("4").is_ok());
    }

    #[test]
    fn test_conversion_response_shape() {
        let body: ConversionResponse = serde_json::from_str(
            r#"{"data": {
                "hijri": {
                    "day": "7",
                    "month": {"number": 3, "en": "Rabīʿ al-awwal", "ar": "رَبيع الأوّل"},
                    "year": "1448",
                    "weekday": {"ar": "الثلاثاء"}
                },
                "gregorian": {
                    "date": "25-08-2026",
                    "day": "25",
                    "month": {"en": "August"},
                    "year": "2026"
                }
            }}"#,
        )
        .unwrap();

        let hijri = hijri_from_part(body.data.hijri, "25-08-2026").unwrap();
        assert_eq!(hijri.day, 7);
        assert_eq!(hijri.month_number, 3);
        assert_eq!(hijri.year, 1448);
        assert_eq!(hijri.month_ar, "رَبيع الأوّل");
    }
}
