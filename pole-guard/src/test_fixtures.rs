//! Sample pole records and tables for tests and benchmarks.

use crate::core::RawRecord;
use crate::sources::{CsvOptions, PoleTable};

/// Header of the synthetic survey table.
pub const SURVEY_HEADER: &str = "HANDLE,TYPE,OWNER,LWSTPWR,BLNK,TRFCCRCT,STLT,CATV,TELCO,UKNCM,PLHT,COMNTS";

/// A joint pole that is clear: power well above the proposed height.
pub fn clear_joint_pole() -> RawRecord {
    RawRecord::builder("J-CLEAR")
        .cell("TYPE", "JNT")
        .cell("LWSTPWR", "PWR 32 0")
        .cell("CATV", "CATV 18 6")
        .cell("TELCO", "TELCO 17 0")
        .build()
}

/// A joint pole with every kind of obstacle too close to the proposed height.
pub fn crowded_joint_pole() -> RawRecord {
    RawRecord::builder("J-CROWDED")
        .cell("TYPE", "JNT")
        .cell("LWSTPWR", "PWR 21 0")
        .cell("BLNK", "TRANS BTM 21 6/STLT DL 20 0")
        .cell("TRFCCRCT", "TRFC 20 2")
        .cell("STLT", "BTM 19 8")
        .cell("CATV", "CATV 18 6")
        .build()
}

/// A telephone-only pole with its height recorded in `PLHT`.
pub fn telephone_pole(height: &str) -> RawRecord {
    RawRecord::builder("T-1")
        .cell("TYPE", "TELCOPL")
        .cell("LWSTPWR", "PWR 30 0")
        .cell("CATV", "CATV 18 6")
        .cell("PLHT", height)
        .build()
}

/// One synthetic survey row; every third pole has power within 40".
pub fn survey_row(index: usize) -> String {
    let power = if index % 3 == 0 { "PWR 22 0" } else { "PWR 31 6" };
    let kind = if index % 10 == 9 { "TELCOPL" } else { "JNT" };
    format!(
        "'{index:05}',{kind},UTIL,{power},PRI 34 0/STLT DL 27 0,TRFC 28 0,BTM 26 4,CATV 18 6,TELCO 17 2/FIBER 16 8,,40 0,survey {index}"
    )
}

/// A synthetic survey table with `rows` poles.
pub fn survey_table(rows: usize) -> PoleTable {
    let mut data = String::from(SURVEY_HEADER);
    data.push('\n');
    for index in 0..rows {
        data.push_str(&survey_row(index));
        data.push('\n');
    }
    PoleTable::from_reader(data.as_bytes(), &CsvOptions::default())
        .expect("synthetic survey table is valid CSV")
}
