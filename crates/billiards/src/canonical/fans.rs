//! Fans: maximal runs of triangles turning around one vertex.

use crate::path::EdgePath;

/// A run of consecutive reflections around the same triangle vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fan {
    /// Turn at which the fan opens.
    pub path_index: usize,
    /// Which doubled angle the fan rotates by (0: `2a`, 1: `2b`).
    pub angle_index: usize,
    /// `+1` or `-1`.
    pub orientation: i32,
    pub starts_on_base_edge: bool,
    pub length: usize,
}

impl Fan {
    fn open(path_index: usize, angle_index: usize, orientation: i32, starts_on_base_edge: bool) -> Self {
        Self {
            path_index,
            angle_index,
            orientation,
            starts_on_base_edge,
            length: 1,
        }
    }

    /// Fans that may start a count form.
    pub fn is_start_candidate(&self) -> bool {
        matches!((self.orientation, self.angle_index), (1, 0) | (-1, 1))
    }
}

fn close(current: &mut Option<Fan>, fans: &mut Vec<Fan>) {
    if let Some(mut fan) = current.take() {
        fan.length += 1;
        fans.push(fan);
    }
}

/// Split a periodic path into fans.
///
/// Tracks the index of the edge being reflected through (0 for the base
/// edge). Two consecutive non-base reflections start a fan on a base edge;
/// a change of turn direction away from the base starts one off it. The
/// fan open at the end wraps around and absorbs the turns before the first
/// fan.
pub fn fans_for_edge_path(path: &EdgePath) -> Vec<Fan> {
    let mut fans = Vec::new();
    let mut current: Option<Fan> = None;
    let mut prev_turn = path.turn_at(-1);
    let mut prev_reflecting: i32 = 0;
    let mut parity: i32 = 1;
    for (i, &turn) in path.turns().iter().enumerate() {
        let turn_sign = turn.sign();
        let reflecting = (prev_reflecting + turn_sign * parity).rem_euclid(3);
        if reflecting != 0 && prev_reflecting != 0 {
            close(&mut current, &mut fans);
            current = Some(Fan::open(i, (reflecting % 2) as usize, turn_sign, true));
        } else if prev_turn == turn || reflecting == 0 {
            if let Some(fan) = current.as_mut() {
                fan.length += 1;
            }
        } else {
            close(&mut current, &mut fans);
            let mut fan = Fan::open(i, (reflecting % 2) as usize, -turn_sign, false);
            fan.length += 1;
            current = Some(fan);
        }
        prev_turn = turn;
        parity = -parity;
        prev_reflecting = reflecting;
    }
    if let Some(mut fan) = current {
        if let Some(first) = fans.first() {
            fan.length += first.path_index + 1;
        }
        fans.push(fan);
    }
    fans
}
