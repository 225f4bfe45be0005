pub mod column;

pub use self::column::ColumnVol;
