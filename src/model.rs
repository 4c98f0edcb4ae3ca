// Data types exchanged with the backend and handed to the views

use serde::{Deserialize, Deserializer, Serialize};

/// Reads an explicit `null` as the field's default, the backend writes nulls
/// for absent values instead of omitting them.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A championship year, e.g. `2023`.
pub type Season = u32;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Driver {
    #[serde(deserialize_with = "null_as_default")]
    pub driver_id: String,
    /// Three letter code (VER, HAM), not known for older drivers
    pub code: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub given_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub family_name: String,
    /// Demonym, e.g. "Dutch". Used for the flag lookup.
    pub nationality: Option<String>,
    pub date_of_birth: Option<String>,
    pub url: Option<String>,
}

impl Driver {
    pub fn display_name(&self) -> String {
        match (self.given_name.is_empty(), self.family_name.is_empty()) {
            (false, false) => format!("{} {}", self.given_name, self.family_name),
            (false, true) => self.given_name.clone(),
            (true, false) => self.family_name.clone(),
            (true, true) => self.driver_id.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Constructor {
    #[serde(deserialize_with = "null_as_default")]
    pub constructor_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub nationality: Option<String>,
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Circuit {
    #[serde(deserialize_with = "null_as_default")]
    pub circuit_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub circuit_name: String,
    pub locality: Option<String>,
    pub country: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RaceTime {
    pub millis: Option<String>,
    pub time: Option<String>,
}

/// One classified participant of a race.
///
/// Position, points, grid and laps are kept as strings since the backend
/// mirrors the upstream feed where non-finishers carry textual values.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RaceResult {
    #[serde(deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(deserialize_with = "null_as_default")]
    pub points: String,
    #[serde(deserialize_with = "null_as_default")]
    pub grid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub laps: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub driver: Driver,
    #[serde(deserialize_with = "null_as_default")]
    pub constructor: Constructor,
    pub time: Option<RaceTime>,
}

/// A race as returned by `GET /races/{year}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RaceRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub season: Season,
    #[serde(deserialize_with = "null_as_default")]
    pub round: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub race_name: String,
    pub date: Option<String>,
    pub time: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub circuit: Circuit,
    /// Classification order, the winner comes first
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<RaceResult>,
}

/// A race with its winner resolved from the classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Race {
    pub season: Season,
    pub round: u32,
    pub race_name: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub circuit: Circuit,
    pub results: Vec<RaceResult>,
    pub winner: Option<Driver>,
    pub constructor: Option<Constructor>,
}

impl Race {
    /// Finishing time of the winner, if the backend reported one.
    pub fn winning_time(&self) -> Option<&str> {
        self.results
            .first()
            .and_then(|r| r.time.as_ref())
            .and_then(|t| t.time.as_deref())
    }
}

impl From<RaceRecord> for Race {
    fn from(record: RaceRecord) -> Self {
        // a first result sent with a null driver or constructor names nobody
        let first = record.results.first();
        let winner = first
            .map(|r| &r.driver)
            .filter(|d| !d.driver_id.is_empty())
            .cloned();
        let constructor = first
            .map(|r| &r.constructor)
            .filter(|c| !c.constructor_id.is_empty())
            .cloned();
        Self {
            season: record.season,
            round: record.round,
            race_name: record.race_name,
            date: record.date,
            time: record.time,
            circuit: record.circuit,
            results: record.results,
            winner,
            constructor,
        }
    }
}

/// One entry of `GET /champions`: the year plus the champion's driver fields.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChampionRecord {
    pub year: Season,
    #[serde(flatten)]
    pub driver: Driver,
    #[serde(default)]
    pub points: Option<f32>,
    #[serde(default)]
    pub wins: Option<u32>,
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_winner_derived_from_first_result() {
        let max = driver("max_verstappen", "Max", "Verstappen");
        let lando = driver("norris", "Lando", "Norris");
        let red_bull = constructor("red_bull", "Red Bull");
        let mclaren = constructor("mclaren", "McLaren");
        let record = race_record(
            2023,
            1,
            vec![
                result(max.clone(), red_bull.clone(), "1"),
                result(lando, mclaren, "2"),
            ],
        );

        let race = Race::from(record);

        assert_eq!(race.winner, Some(max));
        assert_eq!(race.constructor, Some(red_bull));
        assert_eq!(race.results.len(), 2);
    }

    #[test]
    fn test_empty_results_have_no_winner() {
        let race = Race::from(race_record(2025, 3, vec![]));
        assert!(race.winner.is_none());
        assert!(race.constructor.is_none());
        assert!(race.winning_time().is_none());
    }

    #[test]
    fn test_race_record_deserializes_backend_payload() {
        let payload = r#"{
            "season": 2024,
            "round": 1,
            "raceName": "Bahrain Grand Prix",
            "date": "2024-03-02",
            "time": "15:00:00Z",
            "circuit": {"circuitId": "bahrain", "circuitName": "Bahrain International Circuit", "locality": "Sakhir", "country": "Bahrain"},
            "results": [{
                "position": "1", "points": "26", "grid": "1", "laps": "57", "status": "Finished",
                "driver": {"driverId": "max_verstappen", "code": "VER", "givenName": "Max", "familyName": "Verstappen", "nationality": "Dutch"},
                "constructor": {"constructorId": "red_bull", "name": "Red Bull", "nationality": "Austrian"},
                "time": {"millis": "5504742", "time": "1:31:44.742"}
            }]
        }"#;

        let race = Race::from(serde_json::from_str::<RaceRecord>(payload).unwrap());

        assert_eq!(race.race_name, "Bahrain Grand Prix");
        assert_eq!(race.circuit.locality.as_deref(), Some("Sakhir"));
        assert_eq!(race.winner.as_ref().unwrap().driver_id, "max_verstappen");
        assert_eq!(race.constructor.as_ref().unwrap().name, "Red Bull");
        assert_eq!(race.winning_time(), Some("1:31:44.742"));
    }

    #[test]
    fn test_race_record_tolerates_nulls() {
        let payload = r#"{
            "season": 2024,
            "round": 4,
            "raceName": "Japanese Grand Prix",
            "date": "2024-04-07",
            "time": null,
            "circuit": null,
            "results": [{
                "position": "1", "points": "25", "grid": null, "laps": null, "status": "Finished",
                "driver": {"driverId": "max_verstappen", "code": null, "givenName": "Max", "familyName": "Verstappen", "nationality": "Dutch", "dateOfBirth": null, "url": null},
                "constructor": {"constructorId": "red_bull", "name": null, "nationality": null, "url": null},
                "time": null
            }, {
                "position": "2", "points": null, "grid": "3", "laps": "53", "status": null,
                "driver": null,
                "constructor": null,
                "time": {"millis": null, "time": null}
            }]
        }"#;

        let race = Race::from(serde_json::from_str::<RaceRecord>(payload).unwrap());

        assert_eq!(race.race_name, "Japanese Grand Prix");
        assert_eq!(race.circuit, Circuit::default());
        assert_eq!(race.results.len(), 2);
        assert_eq!(race.results[0].grid, "");
        assert_eq!(race.results[1].driver, Driver::default());
        assert_eq!(race.winner.as_ref().unwrap().driver_id, "max_verstappen");
        assert_eq!(race.constructor.as_ref().unwrap().constructor_id, "red_bull");
        assert_eq!(race.constructor.as_ref().unwrap().name, "");
        assert!(race.winning_time().is_none());
    }

    #[test]
    fn test_null_winner_is_no_winner() {
        let payload = r#"{"season": 2024, "round": null, "raceName": null, "results": [
            {"position": "1", "driver": null, "constructor": null}
        ]}"#;

        let race = Race::from(serde_json::from_str::<RaceRecord>(payload).unwrap());

        assert_eq!(race.round, 0);
        assert_eq!(race.race_name, "");
        assert_eq!(race.results.len(), 1);
        assert!(race.winner.is_none());
        assert!(race.constructor.is_none());
    }

    #[test]
    fn test_null_results_is_empty() {
        let record: RaceRecord =
            serde_json::from_str(r#"{"season": 1950, "round": 1, "results": null}"#).unwrap();
        assert!(record.results.is_empty());
    }

    #[test]
    fn test_champion_record_tolerates_null_names() {
        let payload = r#"{"year": 1958, "driverId": "hawthorn", "code": null,
            "givenName": null, "familyName": "Hawthorn", "nationality": "British"}"#;

        let champion: ChampionRecord = serde_json::from_str(payload).unwrap();

        assert_eq!(champion.driver.display_name(), "Hawthorn");
        assert!(champion.driver.code.is_none());
    }

    #[test]
    fn test_champion_record_flattens_driver() {
        let payload = r#"{"year": 2021, "driverId": "max_verstappen", "code": "VER",
            "givenName": "Max", "familyName": "Verstappen", "nationality": "Dutch",
            "points": 395.5, "wins": 10}"#;

        let champion: ChampionRecord = serde_json::from_str(payload).unwrap();

        assert_eq!(champion.year, 2021);
        assert_eq!(champion.driver.driver_id, "max_verstappen");
        assert_eq!(champion.driver.display_name(), "Max Verstappen");
        assert_eq!(champion.wins, Some(10));
        assert!(champion.driver.url.is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let anonymous = driver("unknown_driver", "", "");
        assert_eq!(anonymous.display_name(), "unknown_driver");
        assert_eq!(driver("senna", "", "Senna").display_name(), "Senna");
    }
}
