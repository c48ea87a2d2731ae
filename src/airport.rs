use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;
use tabled::Tabled;

pub type AirportCode = Arc<str>;

const MAX_SEARCH_RESULTS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Tabled)]
pub struct Airport {
    #[tabled(rename = "IATA")]
    pub iata: &'static str,
    #[tabled(rename = "Name")]
    pub name: &'static str,
    #[tabled(rename = "City")]
    pub city: &'static str,
    #[tabled(rename = "Country")]
    pub country: &'static str,
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.iata, self.name)
    }
}

const fn airport(iata: &'static str, name: &'static str, city: &'static str, country: &'static str) -> Airport {
    Airport { iata, name, city, country }
}

pub static AIRPORTS: &[Airport] = &[
    airport("ATL", "Hartsfield-Jackson Atlanta International", "Atlanta", "USA"),
    airport("LAX", "Los Angeles International", "Los Angeles", "USA"),
    airport("ORD", "O'Hare International", "Chicago", "USA"),
    airport("DFW", "Dallas/Fort Worth International", "Dallas", "USA"),
    airport("DEN", "Denver International", "Denver", "USA"),
    airport("JFK", "John F. Kennedy International", "New York", "USA"),
    airport("SFO", "San Francisco International", "San Francisco", "USA"),
    airport("SEA", "Seattle-Tacoma International", "Seattle", "USA"),
    airport("LAS", "McCarran International", "Las Vegas", "USA"),
    airport("MIA", "Miami International", "Miami", "USA"),
    airport("CLT", "Charlotte Douglas International", "Charlotte", "USA"),
    airport("PHX", "Phoenix Sky Harbor International", "Phoenix", "USA"),
    airport("EWR", "Newark Liberty International", "Newark", "USA"),
    airport("IAH", "George Bush Intercontinental", "Houston", "USA"),
    airport("MCO", "Orlando International", "Orlando", "USA"),
    airport("MSP", "Minneapolis-Saint Paul International", "Minneapolis", "USA"),
    airport("DTW", "Detroit Metropolitan", "Detroit", "USA"),
    airport("PHL", "Philadelphia International", "Philadelphia", "USA"),
    airport("LGA", "LaGuardia", "New York", "USA"),
    airport("BWI", "Baltimore/Washington International", "Baltimore", "USA"),
    airport("SLC", "Salt Lake City International", "Salt Lake City", "USA"),
    airport("DCA", "Ronald Reagan Washington National", "Washington", "USA"),
    airport("MDW", "Chicago Midway International", "Chicago", "USA"),
    airport("HNL", "Daniel K. Inouye International", "Honolulu", "USA"),
    airport("BOS", "Logan International", "Boston", "USA"),
    airport("FLL", "Fort Lauderdale-Hollywood International", "Fort Lauderdale", "USA"),
    airport("IAD", "Washington Dulles International", "Washington", "USA"),
    airport("SAN", "San Diego International", "San Diego", "USA"),
    airport("TPA", "Tampa International", "Tampa", "USA"),
    airport("PDX", "Portland International", "Portland", "USA"),
    airport("LHR", "London Heathrow", "London", "UK"),
    airport("CDG", "Charles de Gaulle", "Paris", "France"),
    airport("AMS", "Amsterdam Schiphol", "Amsterdam", "Netherlands"),
    airport("FRA", "Frankfurt am Main", "Frankfurt", "Germany"),
    airport("MAD", "Adolfo Suárez Madrid-Barajas", "Madrid", "Spain"),
    airport("FCO", "Leonardo da Vinci-Fiumicino", "Rome", "Italy"),
    airport("MUC", "Munich", "Munich", "Germany"),
    airport("LGW", "London Gatwick", "London", "UK"),
    airport("BCN", "Barcelona-El Prat", "Barcelona", "Spain"),
    airport("ZUR", "Zurich", "Zurich", "Switzerland"),
    airport("VIE", "Vienna International", "Vienna", "Austria"),
    airport("DUB", "Dublin", "Dublin", "Ireland"),
    airport("CPH", "Copenhagen", "Copenhagen", "Denmark"),
    airport("OSL", "Oslo Gardermoen", "Oslo", "Norway"),
    airport("ARN", "Stockholm Arlanda", "Stockholm", "Sweden"),
    airport("HEL", "Helsinki-Vantaa", "Helsinki", "Finland"),
    airport("DXB", "Dubai International", "Dubai", "UAE"),
    airport("DOH", "Hamad International", "Doha", "Qatar"),
    airport("AUH", "Abu Dhabi International", "Abu Dhabi", "UAE"),
    airport("IST", "Istanbul Airport", "Istanbul", "Turkey"),
    airport("TLV", "Ben Gurion", "Tel Aviv", "Israel"),
    airport("PEK", "Beijing Capital", "Beijing", "China"),
    airport("PVG", "Shanghai Pudong International", "Shanghai", "China"),
    airport("HKG", "Hong Kong International", "Hong Kong", "China"),
    airport("NRT", "Narita International", "Tokyo", "Japan"),
    airport("HND", "Haneda", "Tokyo", "Japan"),
    airport("ICN", "Incheon International", "Seoul", "South Korea"),
    airport("SIN", "Singapore Changi", "Singapore", "Singapore"),
    airport("BKK", "Suvarnabhumi", "Bangkok", "Thailand"),
    airport("KUL", "Kuala Lumpur International", "Kuala Lumpur", "Malaysia"),
    airport("SYD", "Sydney Kingsford Smith", "Sydney", "Australia"),
    airport("MEL", "Melbourne", "Melbourne", "Australia"),
    airport("YYZ", "Toronto Pearson", "Toronto", "Canada"),
    airport("YVR", "Vancouver International", "Vancouver", "Canada"),
    airport("GRU", "São Paulo/Guarulhos", "São Paulo", "Brazil"),
    airport("GIG", "Rio de Janeiro-Galeão", "Rio de Janeiro", "Brazil"),
    airport("EZE", "Ministro Pistarini", "Buenos Aires", "Argentina"),
    airport("MEX", "Mexico City International", "Mexico City", "Mexico"),
    airport("ATH", "Athens International", "Athens", "Greece"),
    airport("SKG", "Thessaloniki Macedonia", "Thessaloniki", "Greece"),
    airport("HER", "Heraklion International", "Heraklion", "Greece"),
    airport("RHO", "Rhodes International", "Rhodes", "Greece"),
    airport("CHQ", "Chania International", "Chania", "Greece"),
    airport("JMK", "Mykonos", "Mykonos", "Greece"),
    airport("JTR", "Santorini (Thira) National", "Santorini", "Greece"),
    airport("CFU", "Corfu International", "Corfu", "Greece"),
    airport("ZTH", "Zakynthos International", "Zakynthos", "Greece"),
    airport("KGS", "Kos International", "Kos", "Greece"),
    airport("KVA", "Kavala International", "Kavala", "Greece"),
    airport("EFL", "Kefalonia International", "Kefalonia", "Greece"),
    airport("SMI", "Samos International", "Samos", "Greece"),
    airport("JSI", "Skiathos", "Skiathos", "Greece"),
    airport("LRS", "Leros", "Leros", "Greece"),
    airport("PVK", "Aktion National", "Preveza", "Greece"),
    airport("AXD", "Alexandroupolis", "Alexandroupolis", "Greece"),
    airport("IOA", "Ioannina National", "Ioannina", "Greece"),
    airport("KIT", "Kithira", "Kithira", "Greece"),
    airport("KLX", "Kalamata International", "Kalamata", "Greece"),
    airport("AOK", "Karpathos", "Karpathos", "Greece"),
    airport("KSJ", "Kasos", "Kasos", "Greece"),
    airport("KZI", "Kozani National", "Kozani", "Greece"),
    airport("LXS", "Limnos", "Limnos", "Greece"),
    airport("MLO", "Milos", "Milos", "Greece"),
    airport("MJT", "Mytilene International", "Mytilene", "Greece"),
    airport("PAS", "Paros", "Paros", "Greece"),
    airport("PAT", "Araxos", "Patras", "Greece"),
    airport("PKH", "Porto Cheli", "Porto Cheli", "Greece"),
    airport("SPJ", "Sparti", "Sparti", "Greece"),
    airport("SXO", "Stavros", "Stavros", "Greece"),
    airport("SKU", "Skyros", "Skyros", "Greece"),
    airport("VOL", "Nea Anchialos National", "Volos", "Greece"),
];

pub fn search(query: &str) -> Vec<&'static Airport> {
    if query.is_empty() {
        return vec![];
    }
    let query = query.to_lowercase();
    AIRPORTS
        .iter()
        .filter(|a| {
            a.iata.to_lowercase().contains(&query)
                || a.name.to_lowercase().contains(&query)
                || a.city.to_lowercase().contains(&query)
        })
        .take(MAX_SEARCH_RESULTS)
        .collect()
}

pub fn by_iata(code: &str) -> Option<&'static Airport> {
    AIRPORTS.iter().find(|a| a.iata.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_finds_nothing() {
        assert!(search("").is_empty());
    }

    #[test]
    fn test_search_by_city_and_code() {
        let tokyo = search("tokyo").iter().map(|a| a.iata).collect::<Vec<_>>();
        assert_eq!(vec!["NRT", "HND"], tokyo);

        let lhr = search("LHR");
        assert_eq!(1, lhr.len());
        assert_eq!("London Heathrow", lhr[0].name);
    }

    #[test]
    fn test_search_is_capped() {
        assert_eq!(MAX_SEARCH_RESULTS, search("a").len());
    }

    #[test]
    fn test_by_iata_ignores_case() {
        assert_eq!(Some("Athens"), by_iata("ath").map(|a| a.city));
        assert_eq!(None, by_iata("XXX"));
    }
}
