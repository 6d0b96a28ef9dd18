/// 演职员映射器
/// TMDB credits → 领域 Credit，空名条目过滤

use crate::types::movie::{CastMember, Credit, CrewMember};
use crate::types::tmdb::TmdbCredits;

/// 演职员归一化，顺序保持上游返回顺序
pub fn map_credit(movie_id: u64, raw: TmdbCredits) -> Credit {
    Credit {
        movie_id,
        cast: raw
            .cast
            .into_iter()
            .filter(|c| !c.name.is_empty())
            .map(|c| CastMember { name: c.name })
            .collect(),
        crew: raw
            .crew
            .into_iter()
            .filter(|c| !c.name.is_empty())
            .map(|c| CrewMember {
                name: c.name,
                job: c.job,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tmdb::{TmdbCastEntry, TmdbCrewEntry};

    #[test]
    fn keeps_order_and_drops_nameless_entries() {
        let raw = TmdbCredits {
            id: 550,
            cast: vec![
                TmdbCastEntry {
                    name: "Edward Norton".into(),
                },
                TmdbCastEntry {
                    name: String::new(),
                },
                TmdbCastEntry {
                    name: "Brad Pitt".into(),
                },
            ],
            crew: vec![TmdbCrewEntry {
                name: "David Fincher".into(),
                job: "Director".into(),
            }],
        };

        let credit = map_credit(550, raw);
        assert_eq!(credit.movie_id, 550);
        assert_eq!(credit.cast.len(), 2);
        assert_eq!(credit.cast[0].name, "Edward Norton");
        assert_eq!(credit.cast[1].name, "Brad Pitt");
        assert_eq!(credit.crew[0].job, "Director");
    }
}
