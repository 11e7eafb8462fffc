use serde::Serialize;
use wastewatch_core::error::ReportError;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
