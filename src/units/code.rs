use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Canonical unit code for a product's measurement unit.
///
/// The token set mirrors what construction-material listings actually use:
/// metric units, a handful of imperial ones, and Indonesian count/time words
/// (PCS "buah", SAK cement sacks, HARI rental days).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitCode {
    // Area
    M2,
    Cm2,
    Inch2,
    Mm2,
    // Volume
    M3,
    Cm3,
    // Weight
    Kg,
    Gram,
    Ton,
    Pound,
    // Length
    M,
    Cm,
    Mm,
    Inch,
    Feet,
    // Liquid
    Liter,
    Ml,
    Gallon,
    // Electrical
    Watt,
    Kwh,
    Volt,
    Ampere,
    Kva,
    Hp,
    // Quantity
    Pcs,
    Set,
    Pack,
    Box,
    Roll,
    Sheet,
    Papan,
    Batang,
    Lembar,
    Unit,
    Sak,
    // Time
    Hari,
    Minggu,
    Bulan,
    Tahun,
    Jam,
    Menit,
    Detik,
    // Pressure
    Psi,
    Bar,
    // Speed
    Mph,
    Kmh,
}

impl UnitCode {
    pub fn as_str(self) -> &'static str {
        match self {
            UnitCode::M2 => "M²",
            UnitCode::Cm2 => "CM²",
            UnitCode::Inch2 => "INCH²",
            UnitCode::Mm2 => "MM²",
            UnitCode::M3 => "M³",
            UnitCode::Cm3 => "CM³",
            UnitCode::Kg => "KG",
            UnitCode::Gram => "GRAM",
            UnitCode::Ton => "TON",
            UnitCode::Pound => "POUND",
            UnitCode::M => "M",
            UnitCode::Cm => "CM",
            UnitCode::Mm => "MM",
            UnitCode::Inch => "INCH",
            UnitCode::Feet => "FEET",
            UnitCode::Liter => "LITER",
            UnitCode::Ml => "ML",
            UnitCode::Gallon => "GALLON",
            UnitCode::Watt => "WATT",
            UnitCode::Kwh => "KWH",
            UnitCode::Volt => "VOLT",
            UnitCode::Ampere => "AMPERE",
            UnitCode::Kva => "KVA",
            UnitCode::Hp => "HP",
            UnitCode::Pcs => "PCS",
            UnitCode::Set => "SET",
            UnitCode::Pack => "PACK",
            UnitCode::Box => "BOX",
            UnitCode::Roll => "ROLL",
            UnitCode::Sheet => "SHEET",
            UnitCode::Papan => "PAPAN",
            UnitCode::Batang => "BATANG",
            UnitCode::Lembar => "LEMBAR",
            UnitCode::Unit => "UNIT",
            UnitCode::Sak => "SAK",
            UnitCode::Hari => "HARI",
            UnitCode::Minggu => "MINGGU",
            UnitCode::Bulan => "BULAN",
            UnitCode::Tahun => "TAHUN",
            UnitCode::Jam => "JAM",
            UnitCode::Menit => "MENIT",
            UnitCode::Detik => "DETIK",
            UnitCode::Psi => "PSI",
            UnitCode::Bar => "BAR",
            UnitCode::Mph => "MPH",
            UnitCode::Kmh => "KMH",
        }
    }

    pub fn is_area(self) -> bool {
        matches!(self, UnitCode::M2 | UnitCode::Cm2 | UnitCode::Inch2 | UnitCode::Mm2)
    }

    pub fn is_volume(self) -> bool {
        matches!(self, UnitCode::M3 | UnitCode::Cm3)
    }

    pub fn is_weight(self) -> bool {
        matches!(self, UnitCode::Kg | UnitCode::Gram | UnitCode::Ton | UnitCode::Pound)
    }
}

impl fmt::Display for UnitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = match s {
            "M²" => UnitCode::M2,
            "CM²" => UnitCode::Cm2,
            "INCH²" => UnitCode::Inch2,
            "MM²" => UnitCode::Mm2,
            "M³" => UnitCode::M3,
            "CM³" => UnitCode::Cm3,
            "KG" => UnitCode::Kg,
            "GRAM" => UnitCode::Gram,
            "TON" => UnitCode::Ton,
            "POUND" => UnitCode::Pound,
            "M" => UnitCode::M,
            "CM" => UnitCode::Cm,
            "MM" => UnitCode::Mm,
            "INCH" => UnitCode::Inch,
            "FEET" => UnitCode::Feet,
            "LITER" => UnitCode::Liter,
            "ML" => UnitCode::Ml,
            "GALLON" => UnitCode::Gallon,
            "WATT" => UnitCode::Watt,
            "KWH" => UnitCode::Kwh,
            "VOLT" => UnitCode::Volt,
            "AMPERE" => UnitCode::Ampere,
            "KVA" => UnitCode::Kva,
            "HP" => UnitCode::Hp,
            "PCS" => UnitCode::Pcs,
            "SET" => UnitCode::Set,
            "PACK" => UnitCode::Pack,
            "BOX" => UnitCode::Box,
            "ROLL" => UnitCode::Roll,
            "SHEET" => UnitCode::Sheet,
            "PAPAN" => UnitCode::Papan,
            "BATANG" => UnitCode::Batang,
            "LEMBAR" => UnitCode::Lembar,
            "UNIT" => UnitCode::Unit,
            "SAK" => UnitCode::Sak,
            "HARI" => UnitCode::Hari,
            "MINGGU" => UnitCode::Minggu,
            "BULAN" => UnitCode::Bulan,
            "TAHUN" => UnitCode::Tahun,
            "JAM" => UnitCode::Jam,
            "MENIT" => UnitCode::Menit,
            "DETIK" => UnitCode::Detik,
            "PSI" => UnitCode::Psi,
            "BAR" => UnitCode::Bar,
            "MPH" => UnitCode::Mph,
            "KMH" => UnitCode::Kmh,
            _ => return Err(format!("unknown unit code: {s}")),
        };
        Ok(code)
    }
}

impl Serialize for UnitCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UnitCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
