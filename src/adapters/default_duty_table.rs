//! Built-in stamp duty brackets.
//!
//! General purchase rates for owner-occupied residential property. Override
//! with `[stamp_duty] table_path` for other rates.

/// Returns the built-in duty table as CSV.
pub fn table() -> &'static str {
    DEFAULT_TABLE
}

const DEFAULT_TABLE: &str = "\
state,max,constant,percent,subtract
Vic,25000,0,1.4,0
Vic,130000,350,2.4,25000
Vic,960000,2870,6,130000
Vic,2000000,0,5.5,0
Vic,inf,110000,6.5,2000000
NSW,16000,0,1.25,0
NSW,35000,200,1.5,16000
NSW,93000,485,1.75,35000
NSW,351000,1500,3.5,93000
NSW,1168000,10530,4.5,351000
NSW,inf,47295,5.5,1168000
Qld,5000,0,0,0
Qld,75000,0,1.5,5000
Qld,540000,1050,3.5,75000
Qld,1000000,17325,4.5,540000
Qld,inf,38025,5.75,1000000
";
