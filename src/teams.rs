/// A selectable AFL team. `id` values are unique across [`AFL_TEAMS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Team {
    pub id: &'static str,
    pub name: &'static str,
}

pub const AFL_TEAMS: [Team; 18] = [
    Team { id: "ade", name: "Adelaide Crows" },
    Team { id: "bri", name: "Brisbane Lions" },
    Team { id: "car", name: "Carlton Blues" },
    Team { id: "col", name: "Collingwood Magpies" },
    Team { id: "ess", name: "Essendon Bombers" },
    Team { id: "fre", name: "Fremantle Dockers" },
    Team { id: "gee", name: "Geelong Cats" },
    Team { id: "gcs", name: "Gold Coast Suns" },
    Team { id: "gws", name: "GWS Giants" },
    Team { id: "haw", name: "Hawthorn Hawks" },
    Team { id: "mel", name: "Melbourne Demons" },
    Team { id: "nor", name: "North Melbourne Kangaroos" },
    Team { id: "por", name: "Port Adelaide Power" },
    Team { id: "ric", name: "Richmond Tigers" },
    Team { id: "stk", name: "St Kilda Saints" },
    Team { id: "syd", name: "Sydney Swans" },
    Team { id: "wce", name: "West Coast Eagles" },
    Team { id: "wbd", name: "Western Bulldogs" },
];

pub fn team_by_id(id: &str) -> Option<&'static Team> {
    AFL_TEAMS.iter().find(|team| team.id == id)
}
