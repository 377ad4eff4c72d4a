//! Static Qur'an metadata.
//!
//! One entry per surah: names, verse count, revelation place and revelation
//! order. Loaded once into the binary and treated as immutable for the process
//! lifetime; every reference validation in the bot goes through this table.

use crate::error::{MinbarError, Result};
use crate::resolver::NameTable;

/// Where a surah was revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevelationPlace {
    Makkah,
    Madinah,
}

impl RevelationPlace {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevelationPlace::Makkah => "Makkah",
            RevelationPlace::Madinah => "Madinah",
        }
    }
}

/// Metadata for a single surah.
#[derive(Debug, Clone, Copy)]
pub struct SurahInfo {
    /// Canonical number, 1..=114
    pub number: u16,
    /// Transliterated name, e.g. "Al-Fatihah"
    pub name: &'static str,
    /// English name, e.g. "The Opener"
    pub translated_name: &'static str,
    /// Arabic name
    pub arabic_name: &'static str,
    /// Number of verses in the surah
    pub verse_count: u16,
    pub place: RevelationPlace,
    /// Position in the chronological revelation order, 1..=114
    pub revelation_order: u16,
}

use RevelationPlace::{Madinah, Makkah};

macro_rules! surah {
    ($num:expr, $name:expr, $translated:expr, $arabic:expr, $verses:expr, $place:expr, $order:expr) => {
        SurahInfo {
            number: $num,
            name: $name,
            translated_name: $translated,
            arabic_name: $arabic,
            verse_count: $verses,
            place: $place,
            revelation_order: $order,
        }
    };
}

/// All 114 surahs in canonical order.
pub const SURAHS: [SurahInfo; 114] = [
    surah!(1, "Al-Fatihah", "The Opener", "الفاتحة", 7, Makkah, 5),
    surah!(2, "Al-Baqarah", "The Cow", "البقرة", 286, Madinah, 87),
    surah!(3, "Ali 'Imran", "Family of Imran", "آل عمران", 200, Madinah, 89),
    surah!(4, "An-Nisa", "The Women", "النساء", 176, Madinah, 92),
    surah!(5, "Al-Ma'idah", "The Table Spread", "المائدة", 120, Madinah, 112),
    surah!(6, "Al-An'am", "The Cattle", "الأنعام", 165, Makkah, 55),
    surah!(7, "Al-A'raf", "The Heights", "الأعراف", 206, Makkah, 39),
    surah!(8, "Al-Anfal", "The Spoils of War", "الأنفال", 75, Madinah, 88),
    surah!(9, "At-Tawbah", "The Repentance", "التوبة", 129, Madinah, 113),
    surah!(10, "Yunus", "Jonah", "يونس", 109, Makkah, 51),
    surah!(11, "Hud", "Hud", "هود", 123, Makkah, 52),
    surah!(12, "Yusuf", "Joseph", "يوسف", 111, Makkah, 53),
    surah!(13, "Ar-Ra'd", "The Thunder", "الرعد", 43, Madinah, 96),
    surah!(14, "Ibrahim", "Abraham", "إبراهيم", 52, Makkah, 72),
    surah!(15, "Al-Hijr", "The Rocky Tract", "الحجر", 99, Makkah, 54),
    surah!(16, "An-Nahl", "The Bee", "النحل", 128, Makkah, 70),
    surah!(17, "Al-Isra", "The Night Journey", "الإسراء", 111, Makkah, 50),
    surah!(18, "Al-Kahf", "The Cave", "الكهف", 110, Makkah, 69),
    surah!(19, "Maryam", "Mary", "مريم", 98, Makkah, 44),
    surah!(20, "Taha", "Ta-Ha", "طه", 135, Makkah, 45),
    surah!(21, "Al-Anbya", "The Prophets", "الأنبياء", 112, Makkah, 73),
    surah!(22, "Al-Hajj", "The Pilgrimage", "الحج", 78, Madinah, 103),
    surah!(23, "Al-Mu'minun", "The Believers", "المؤمنون", 118, Makkah, 74),
    surah!(24, "An-Nur", "The Light", "النور", 64, Madinah, 102),
    surah!(25, "Al-Furqan", "The Criterion", "الفرقان", 77, Makkah, 42),
    surah!(26, "Ash-Shu'ara", "The Poets", "الشعراء", 227, Makkah, 47),
    surah!(27, "An-Naml", "The Ant", "النمل", 93, Makkah, 48),
    surah!(28, "Al-Qasas", "The Stories", "القصص", 88, Makkah, 49),
    surah!(29, "Al-'Ankabut", "The Spider", "العنكبوت", 69, Makkah, 85),
    surah!(30, "Ar-Rum", "The Romans", "الروم", 60, Makkah, 84),
    surah!(31, "Luqman", "Luqman", "لقمان", 34, Makkah, 57),
    surah!(32, "As-Sajdah", "The Prostration", "السجدة", 30, Makkah, 75),
    surah!(33, "Al-Ahzab", "The Combined Forces", "الأحزاب", 73, Madinah, 90),
    surah!(34, "Saba", "Sheba", "سبأ", 54, Makkah, 58),
    surah!(35, "Fatir", "Originator", "فاطر", 45, Makkah, 43),
    surah!(36, "Ya-Sin", "Ya Sin", "يس", 83, Makkah, 41),
    surah!(37, "As-Saffat", "Those Who Set the Ranks", "الصافات", 182, Makkah, 56),
    surah!(38, "Sad", "The Letter Sad", "ص", 88, Makkah, 38),
    surah!(39, "Az-Zumar", "The Troops", "الزمر", 75, Makkah, 59),
    surah!(40, "Ghafir", "The Forgiver", "غافر", 85, Makkah, 60),
    surah!(41, "Fussilat", "Explained in Detail", "فصلت", 54, Makkah, 61),
    surah!(42, "Ash-Shuraa", "The Consultation", "الشورى", 53, Makkah, 62),
    surah!(43, "Az-Zukhruf", "The Ornaments of Gold", "الزخرف", 89, Makkah, 63),
    surah!(44, "Ad-Dukhan", "The Smoke", "الدخان", 59, Makkah, 64),
    surah!(45, "Al-Jathiyah", "The Crouching", "الجاثية", 37, Makkah, 65),
    surah!(46, "Al-Ahqaf", "The Wind-Curved Sandhills", "الأحقاف", 35, Makkah, 66),
    surah!(47, "Muhammad", "Muhammad", "محمد", 38, Madinah, 95),
    surah!(48, "Al-Fath", "The Victory", "الفتح", 29, Madinah, 111),
    surah!(49, "Al-Hujurat", "The Rooms", "الحجرات", 18, Madinah, 106),
    surah!(50, "Qaf", "The Letter Qaf", "ق", 45, Makkah, 34),
    surah!(51, "Adh-Dhariyat", "The Winnowing Winds", "الذاريات", 60, Makkah, 67),
    surah!(52, "At-Tur", "The Mount", "الطور", 49, Makkah, 76),
    surah!(53, "An-Najm", "The Star", "النجم", 62, Makkah, 23),
    surah!(54, "Al-Qamar", "The Moon", "القمر", 55, Makkah, 37),
    surah!(55, "Ar-Rahman", "The Beneficent", "الرحمن", 78, Madinah, 97),
    surah!(56, "Al-Waqi'ah", "The Inevitable", "الواقعة", 96, Makkah, 46),
    surah!(57, "Al-Hadid", "The Iron", "الحديد", 29, Madinah, 94),
    surah!(58, "Al-Mujadila", "The Pleading Woman", "المجادلة", 22, Madinah, 105),
    surah!(59, "Al-Hashr", "The Exile", "الحشر", 24, Madinah, 101),
    surah!(60, "Al-Mumtahanah", "She That Is To Be Examined", "الممتحنة", 13, Madinah, 91),
    surah!(61, "As-Saf", "The Ranks", "الصف", 14, Madinah, 109),
    surah!(62, "Al-Jumu'ah", "The Congregation", "الجمعة", 11, Madinah, 110),
    surah!(63, "Al-Munafiqun", "The Hypocrites", "المنافقون", 11, Madinah, 104),
    surah!(64, "At-Taghabun", "The Mutual Disillusion", "التغابن", 18, Madinah, 108),
    surah!(65, "At-Talaq", "The Divorce", "الطلاق", 12, Madinah, 99),
    surah!(66, "At-Tahrim", "The Prohibition", "التحريم", 12, Madinah, 107),
    surah!(67, "Al-Mulk", "The Sovereignty", "الملك", 30, Makkah, 77),
    surah!(68, "Al-Qalam", "The Pen", "القلم", 52, Makkah, 2),
    surah!(69, "Al-Haqqah", "The Reality", "الحاقة", 52, Makkah, 78),
    surah!(70, "Al-Ma'arij", "The Ascending Stairways", "المعارج", 44, Makkah, 79),
    surah!(71, "Nuh", "Noah", "نوح", 28, Makkah, 71),
    surah!(72, "Al-Jinn", "The Jinn", "الجن", 28, Makkah, 40),
    surah!(73, "Al-Muzzammil", "The Enshrouded One", "المزمل", 20, Makkah, 3),
    surah!(74, "Al-Muddaththir", "The Cloaked One", "المدثر", 56, Makkah, 4),
    surah!(75, "Al-Qiyamah", "The Resurrection", "القيامة", 40, Makkah, 31),
    surah!(76, "Al-Insan", "The Man", "الإنسان", 31, Madinah, 98),
    surah!(77, "Al-Mursalat", "The Emissaries", "المرسلات", 50, Makkah, 33),
    surah!(78, "An-Naba", "The Tidings", "النبأ", 40, Makkah, 80),
    surah!(79, "An-Nazi'at", "Those Who Drag Forth", "النازعات", 46, Makkah, 81),
    surah!(80, "'Abasa", "He Frowned", "عبس", 42, Makkah, 24),
    surah!(81, "At-Takwir", "The Overthrowing", "التكوير", 29, Makkah, 7),
    surah!(82, "Al-Infitar", "The Cleaving", "الانفطار", 19, Makkah, 82),
    surah!(83, "Al-Mutaffifin", "The Defrauding", "المطففين", 36, Makkah, 86),
    surah!(84, "Al-Inshiqaq", "The Sundering", "الانشقاق", 25, Makkah, 83),
    surah!(85, "Al-Buruj", "The Mansions of the Stars", "البروج", 22, Makkah, 27),
    surah!(86, "At-Tariq", "The Nightcomer", "الطارق", 17, Makkah, 36),
    surah!(87, "Al-A'la", "The Most High", "الأعلى", 19, Makkah, 8),
    surah!(88, "Al-Ghashiyah", "The Overwhelming", "الغاشية", 26, Makkah, 68),
    surah!(89, "Al-Fajr", "The Dawn", "الفجر", 30, Makkah, 10),
    surah!(90, "Al-Balad", "The City", "البلد", 20, Makkah, 35),
    surah!(91, "Ash-Shams", "The Sun", "الشمس", 15, Makkah, 26),
    surah!(92, "Al-Layl", "The Night", "الليل", 21, Makkah, 9),
    surah!(93, "Ad-Duhaa", "The Morning Hours", "الضحى", 11, Makkah, 11),
    surah!(94, "Ash-Sharh", "The Relief", "الشرح", 8, Makkah, 12),
    surah!(95, "At-Tin", "The Fig", "التين", 8, Makkah, 28),
    surah!(96, "Al-'Alaq", "The Clot", "العلق", 19, Makkah, 1),
    surah!(97, "Al-Qadr", "The Power", "القدر", 5, Makkah, 25),
    surah!(98, "Al-Bayyinah", "The Clear Proof", "البينة", 8, Madinah, 100),
    surah!(99, "Az-Zalzalah", "The Earthquake", "الزلزلة", 8, Madinah, 93),
    surah!(100, "Al-'Adiyat", "The Courser", "العاديات", 11, Makkah, 14),
    surah!(101, "Al-Qari'ah", "The Calamity", "القارعة", 11, Makkah, 30),
    surah!(102, "At-Takathur", "The Rivalry in World Increase", "التكاثر", 8, Makkah, 16),
    surah!(103, "Al-'Asr", "The Declining Day", "العصر", 3, Makkah, 13),
    surah!(104, "Al-Humazah", "The Traducer", "الهمزة", 9, Makkah, 32),
    surah!(105, "Al-Fil", "The Elephant", "الفيل", 5, Makkah, 19),
    surah!(106, "Quraysh", "Quraysh", "قريش", 4, Makkah, 29),
    surah!(107, "Al-Ma'un", "The Small Kindnesses", "الماعون", 7, Makkah, 17),
    surah!(108, "Al-Kawthar", "The Abundance", "الكوثر", 3, Makkah, 15),
    surah!(109, "Al-Kafirun", "The Disbelievers", "الكافرون", 6, Makkah, 18),
    surah!(110, "An-Nasr", "The Divine Support", "النصر", 3, Madinah, 114),
    surah!(111, "Al-Masad", "The Palm Fiber", "المسد", 5, Makkah, 6),
    surah!(112, "Al-Ikhlas", "The Sincerity", "الإخلاص", 4, Makkah, 22),
    surah!(113, "Al-Falaq", "The Daybreak", "الفلق", 5, Makkah, 20),
    surah!(114, "An-Nas", "Mankind", "الناس", 6, Makkah, 21),
];

/// Look up a surah by canonical number.
///
/// # Errors
///
/// Returns `InvalidSurah` if the number is outside 1..=114.
pub fn get(number: u16) -> Result<&'static SurahInfo> {
    if (1..=114).contains(&number) {
        Ok(&SURAHS[(number - 1) as usize])
    } else {
        Err(MinbarError::InvalidSurah)
    }
}

/// Number of verses in a surah.
pub fn verse_count(number: u16) -> Result<u16> {
    Ok(get(number)?.verse_count)
}

/// Translate a chronological revelation-order position into the canonical
/// surah number.
///
/// # Errors
///
/// Returns `InvalidSurah` if the position is outside 1..=114.
pub fn from_reveal_order(order: u16) -> Result<u16> {
    SURAHS
        .iter()
        .find(|s| s.revelation_order == order)
        .map(|s| s.number)
        .ok_or(MinbarError::InvalidSurah)
}

/// Name→number lookup table for resolving surah names like "Al-Ikhlaas" or
/// "yusuf" to canonical numbers. Lookups are case-insensitive; fuzzy matching
/// through the resolver absorbs spelling variants.
pub fn name_table() -> NameTable<'static, u16> {
    static ENTRIES: std::sync::OnceLock<Vec<(&'static str, u16)>> = std::sync::OnceLock::new();
    let entries = ENTRIES.get_or_init(|| SURAHS.iter().map(|s| (s.name, s.number)).collect());
    NameTable::new("surah", entries, &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_114_entries_in_order() {
        assert_eq!(SURAHS.len(), 114);
        for (i, surah) in SURAHS.iter().enumerate() {
            assert_eq!(surah.number as usize, i + 1);
        }
    }

    #[test]
    fn test_total_verse_count() {
        // The Kufan/Hafs verse numbering used by quran.com
        let total: u32 = SURAHS.iter().map(|s| s.verse_count as u32).sum();
        assert_eq!(total, 6236);
    }

    #[test]
    fn test_revelation_order_is_a_permutation() {
        let mut seen = [false; 114];
        for surah in &SURAHS {
            let order = surah.revelation_order;
            assert!((1..=114).contains(&order), "bad order for {}", surah.name);
            assert!(!seen[(order - 1) as usize], "duplicate order {}", order);
            seen[(order - 1) as usize] = true;
        }
    }

    #[test]
    fn test_get_bounds() {
        assert!(get(0).is_err());
        assert!(get(115).is_err());
        assert_eq!(get(1).unwrap().name, "Al-Fatihah");
        assert_eq!(get(114).unwrap().name, "An-Nas");
    }

    #[test]
    fn test_verse_counts_spot_check() {
        assert_eq!(verse_count(1).unwrap(), 7);
        assert_eq!(verse_count(2).unwrap(), 286);
        assert_eq!(verse_count(108).unwrap(), 3);
    }

    #[test]
    fn test_from_reveal_order() {
        // The first revelation is Al-'Alaq (96)
        assert_eq!(from_reveal_order(1).unwrap(), 96);
        // The last is An-Nasr (110)
        assert_eq!(from_reveal_order(114).unwrap(), 110);
        assert!(from_reveal_order(0).is_err());
        assert!(from_reveal_order(115).is_err());
    }

    #[test]
    fn test_name_table_resolves_exactly() {
        let table = name_table();
        let hit = table.resolve("Yusuf").unwrap();
        assert_eq!(*hit.entry, 12);
    }
}
