use crate::airport::AirportRecord;

/// `"  CODE: name (city) [region, country]"`, omitting empty parts.
pub fn airport_line(code: &str, record: &AirportRecord) -> String {
    let mut line = format!("  {code}: {}", record.name);
    if !record.city.is_empty() {
        line.push_str(&format!(" ({})", record.city));
    }
    let region = record.region_summary();
    if !region.is_empty() {
        line.push_str(&format!(" [{region}]"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_and_sparse_lines() {
        let mut record = AirportRecord::custom("KJFK", "John F Kennedy", "New York", 40.6, -73.7);
        record.iso_region = "US-NY".into();
        record.iso_country = "US".into();
        assert_eq!(airport_line("KJFK", &record), "  KJFK: John F Kennedy (New York) [US-NY, US]");

        record.city.clear();
        record.iso_region.clear();
        assert_eq!(airport_line("KJFK", &record), "  KJFK: John F Kennedy [US]");

        record.iso_country.clear();
        assert_eq!(airport_line("KJFK", &record), "  KJFK: John F Kennedy");
    }
}
