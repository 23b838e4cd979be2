//! Result aggregation
//!
//! A team's score in a round is the mean over the judges who scored it.
//! Its overall score is the mean of those round means, counting only the
//! rounds in which it was scored. Teams are ranked by overall score,
//! highest first, using competition ranking (1, 1, 3). Tied teams are
//! listed by team id.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use kernel::id::RoundId;
use kernel::team::TeamId;

use crate::domain::entity::ScoreEntry;

/// Exact fraction with a positive denominator, kept reduced so equal means
/// compare equal regardless of the order they were summed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ratio {
    num: i128,
    den: i128,
}

impl Ratio {
    fn new(num: i128, den: i128) -> Self {
        let divisor = gcd(num.abs(), den).max(1);
        Self {
            num: num / divisor,
            den: den / divisor,
        }
    }

    fn plus(self, other: Ratio) -> Self {
        Self::new(
            self.num * other.den + other.num * self.den,
            self.den * other.den,
        )
    }

    fn as_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.num * other.den).cmp(&(other.num * self.den))
    }
}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn gcd(mut a: i128, mut b: i128) -> i128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamStanding {
    pub rank: u32,
    pub team_id: TeamId,
    pub average_score: f64,
    pub rounds_scored: u32,
}

pub fn rank_teams(scores: &[ScoreEntry]) -> Vec<TeamStanding> {
    // team -> round -> (sum, count)
    let mut per_round: BTreeMap<TeamId, BTreeMap<RoundId, (i64, u32)>> = BTreeMap::new();
    for score in scores {
        let slot = per_round
            .entry(score.team_id)
            .or_default()
            .entry(score.round_id)
            .or_insert((0, 0));
        slot.0 += i64::from(score.points);
        slot.1 += 1;
    }

    let mut ranked: Vec<(Ratio, TeamStanding)> = per_round
        .into_iter()
        .map(|(team_id, rounds)| {
            let rounds_scored = rounds.len() as u32;
            let total = rounds
                .values()
                .map(|(sum, count)| Ratio::new(i128::from(*sum), i128::from(*count)))
                .fold(Ratio::new(0, 1), Ratio::plus);
            let mean = Ratio::new(total.num, total.den * i128::from(rounds_scored));
            let standing = TeamStanding {
                rank: 0,
                team_id,
                average_score: mean.as_f64(),
                rounds_scored,
            };
            (mean, standing)
        })
        .collect();

    ranked.sort_by(|(a_mean, a), (b_mean, b)| {
        b_mean.cmp(a_mean).then_with(|| a.team_id.cmp(&b.team_id))
    });

    let mut previous: Option<(Ratio, u32)> = None;
    for (index, (mean, standing)) in ranked.iter_mut().enumerate() {
        let rank = match previous {
            Some((prev_mean, rank)) if prev_mean == *mean => rank,
            _ => index as u32 + 1,
        };
        standing.rank = rank;
        previous = Some((*mean, rank));
    }

    ranked.into_iter().map(|(_, standing)| standing).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::Id;

    fn entry(round: i64, judge: i64, team: TeamId, points: i32) -> ScoreEntry {
        ScoreEntry {
            round_id: Id::new(round),
            judge_user_id: Id::new(judge),
            team_id: team,
            points,
        }
    }

    #[test]
    fn test_empty_scores_give_no_standings() {
        assert!(rank_teams(&[]).is_empty());
    }

    #[test]
    fn test_mean_of_round_means() {
        let team = TeamId::generate();
        // Round 1: judges give 80 and 90 -> 85. Round 2: one judge, 70.
        let scores = vec![
            entry(1, 10, team, 80),
            entry(1, 11, team, 90),
            entry(2, 10, team, 70),
        ];
        let standings = rank_teams(&scores);
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[0].rounds_scored, 2);
        assert!((standings[0].average_score - 77.5).abs() < 1e-9);
    }

    #[test]
    fn test_competition_ranking_with_ties() {
        let mut teams = [TeamId::generate(), TeamId::generate(), TeamId::generate()];
        teams.sort();
        let [a, b, c] = teams;

        let scores = vec![
            entry(1, 10, c, 90),
            entry(1, 10, b, 90),
            entry(1, 10, a, 60),
        ];
        let standings = rank_teams(&scores);

        let ranks: Vec<(u32, TeamId)> = standings.iter().map(|s| (s.rank, s.team_id)).collect();
        assert_eq!(ranks, vec![(1, b), (1, c), (3, a)]);
    }

    #[test]
    fn test_equal_means_tie_regardless_of_float_rounding() {
        let mut teams = [TeamId::generate(), TeamId::generate()];
        teams.sort();
        let [a, b] = teams;

        // a: (20 + 20 + 30) / 3 in one round.
        // b: 20 in round 1, (30 + 30 + 20) / 3 in round 2, averaged.
        // Both are 70/3, but the float sums differ in the last bit.
        let scores = vec![
            entry(1, 10, b, 20),
            entry(2, 10, b, 30),
            entry(2, 11, b, 30),
            entry(2, 12, b, 20),
            entry(1, 10, a, 20),
            entry(1, 11, a, 20),
            entry(1, 12, a, 30),
        ];
        let standings = rank_teams(&scores);

        let ranks: Vec<(u32, TeamId)> = standings.iter().map(|s| (s.rank, s.team_id)).collect();
        assert_eq!(ranks, vec![(1, a), (1, b)]);
        assert!((standings[0].average_score - 70.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_unscored_rounds_do_not_drag_average() {
        let strong = TeamId::generate();
        let steady = TeamId::generate();
        // `strong` only appears in round 1, `steady` in both rounds.
        let scores = vec![
            entry(1, 10, strong, 95),
            entry(1, 10, steady, 90),
            entry(2, 10, steady, 80),
        ];
        let standings = rank_teams(&scores);
        assert_eq!(standings[0].team_id, strong);
        assert_eq!(standings[0].rounds_scored, 1);
        assert_eq!(standings[1].team_id, steady);
        assert!((standings[1].average_score - 85.0).abs() < 1e-9);
        assert_eq!(standings[1].rank, 2);
    }
}
