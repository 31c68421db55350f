use crate::model::player::Player;
use crate::model::rules::RuleSet;
use std::collections::BTreeMap;

/// Non-busted seats sharing the same distance from the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroup {
    /// 1-based position of the first slot this group occupies.
    pub rank: u32,
    pub diff: u32,
    pub reward: i32,
    /// Seat indices, in seat order.
    pub members: Vec<usize>,
}

/// Groups non-busted seats by distance, closest first.
///
/// A tied group takes the reward of its first open slot and consumes one slot
/// per member, so the next group starts further down the table.
pub fn rank_groups(players: &[Player], rules: &RuleSet) -> Vec<RankGroup> {
    let mut by_diff: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (seat, player) in players.iter().enumerate() {
        if player.busted {
            continue;
        }
        by_diff
            .entry(player.distance_to(rules.target))
            .or_default()
            .push(seat);
    }

    let rewards = rules.rewards(players.len());
    let mut position = 0usize;
    by_diff
        .into_iter()
        .map(|(diff, members)| {
            let group = RankGroup {
                rank: position as u32 + 1,
                diff,
                reward: rewards.get(position).copied().unwrap_or(0),
                members,
            };
            position += group.members.len();
            group
        })
        .collect()
}

/// Chip movements of one round, before they are written back to the players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// Net chip change per seat.
    pub deltas: Vec<i32>,
    /// Rank per seat; busted seats have none.
    pub ranks: Vec<Option<u32>>,
    /// Seats that hit the target exactly.
    pub perfect: Vec<usize>,
    pub busted: Vec<usize>,
    /// Sole top-rank seat and the reserve it collected.
    pub reserve_claim: Option<(usize, u32)>,
    pub reserve_after: u32,
    /// Rewards plus perfect bonuses; the only chips a round creates.
    pub minted: u32,
}

/// Applies rank rewards, perfect bonus, bust penalty and the reserve payout.
pub fn settle(players: &[Player], reserve: u32, rules: &RuleSet) -> Settlement {
    let seats = players.len();
    let mut deltas = vec![0i32; seats];
    let mut ranks = vec![None; seats];
    let mut perfect = Vec::new();
    let mut minted = 0u32;

    let groups = rank_groups(players, rules);
    for group in &groups {
        for &seat in &group.members {
            ranks[seat] = Some(group.rank);
            deltas[seat] += group.reward;
            minted += group.reward.max(0) as u32;
            if group.diff == 0 {
                deltas[seat] += 1;
                minted += 1;
                perfect.push(seat);
            }
        }
    }

    let mut reserve_after = reserve;
    let busted: Vec<usize> = (0..seats).filter(|&seat| players[seat].busted).collect();
    for &seat in &busted {
        deltas[seat] -= 1;
        reserve_after += 1;
    }

    let mut reserve_claim = None;
    if let Some(top) = groups.first() {
        if let [sole] = top.members.as_slice() {
            if reserve_after > 0 {
                deltas[*sole] += reserve_after as i32;
                reserve_claim = Some((*sole, reserve_after));
                reserve_after = 0;
            }
        }
    }

    Settlement {
        deltas,
        ranks,
        perfect,
        busted,
        reserve_claim,
        reserve_after,
        minted,
    }
}
