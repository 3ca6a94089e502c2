/*!
 * Episode order inference from file names.
 *
 * No naming convention is assumed. For every character offset the inferrer
 * treats the digit run starting there as a candidate episode field and the
 * text before it as a literal prefix (the group key). Items sharing a group
 * key at an offset form a candidate sequence ordered by the parsed number;
 * the largest candidate over all offsets and keys wins.
 *
 * Numbers are compared by value, so `01` and `1` land on the same episode and
 * `10` sorts after `9`. Names without any digit never join a candidate.
 */

use log::{debug, trace};
use std::collections::{BTreeMap, HashMap};

use super::language::language_score;
use crate::media::NamedItem;

// @struct: Items sharing one literal prefix at one offset
struct Group {
    // @field: Parsed episode number -> (item position, language score)
    by_index: BTreeMap<u64, (usize, u8)>,
}

// @struct: Basename of one item split into characters
struct Decomposed {
    chars: Vec<char>,
    score: u8,
}

/// Parse the run of ASCII digits at the start of `chars`.
///
/// Values that do not fit in a `u64` saturate.
fn parse_digit_run(chars: &[char]) -> u64 {
    chars
        .iter()
        .map_while(|c| c.to_digit(10))
        .fold(0u64, |acc, digit| acc.saturating_mul(10).saturating_add(u64::from(digit)))
}

/// Infer the episode order of `items` and return the positions of the placed
/// items, in episode order.
///
/// Positions index into `items`. Items that no winning candidate contains are
/// left out.
pub fn infer_order_indices<T: NamedItem>(items: &[T]) -> Vec<usize> {
    let decomposed: Vec<Decomposed> = items
        .iter()
        .map(|item| Decomposed {
            chars: item.basename().chars().collect(),
            score: language_score(item),
        })
        .collect();

    let longest = decomposed.iter().map(|d| d.chars.len()).max().unwrap_or(0);
    let mut best: Vec<usize> = Vec::new();

    for offset in 0..longest {
        let mut groups: Vec<Group> = Vec::new();
        let mut keys: HashMap<String, usize> = HashMap::new();

        for (position, item) in decomposed.iter().enumerate() {
            let Some(c) = item.chars.get(offset) else {
                continue;
            };
            if !c.is_ascii_digit() {
                continue;
            }

            let index = parse_digit_run(&item.chars[offset..]);
            let key: String = item.chars[..offset].iter().collect();
            let slot = *keys.entry(key).or_insert_with(|| {
                groups.push(Group {
                    by_index: BTreeMap::new(),
                });
                groups.len() - 1
            });

            let group = &mut groups[slot];
            // Only a strictly better language score displaces an earlier item
            let displaces = group
                .by_index
                .get(&index)
                .is_none_or(|&(_, held)| item.score > held);
            if displaces {
                group.by_index.insert(index, (position, item.score));
            }
        }

        for group in &groups {
            if group.by_index.len() > best.len() {
                best = group.by_index.values().map(|&(position, _)| position).collect();
                trace!("offset {}: new best candidate with {} item(s)", offset, best.len());
            }
        }
    }

    debug!("Inferred order for {} of {} item(s)", best.len(), items.len());
    best
}

/// Infer the episode order of `items`.
///
/// Returns the placed items in episode order; an empty result means no order
/// could be inferred.
pub fn infer_order<T: NamedItem + Clone>(items: &[T]) -> Vec<T> {
    infer_order_indices(items)
        .into_iter()
        .map(|position| items[position].clone())
        .collect()
}
