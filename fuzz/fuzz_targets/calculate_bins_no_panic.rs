// SPDX-License-Identifier: MIT OR Apache-2.0

#![no_main]

#[path = "common.rs"]
mod common;

use bblocks_engine::{BayesianBlocks, BlocksConfig};
use bblocks_fitness::{FitnessKind, Prior};
use libfuzzer_sys::fuzz_target;

fn build_prior(kind_seed: u8, value_seed: u8) -> Prior {
    let unit = f64::from(value_seed) / 255.0;
    match kind_seed % 5 {
        0 => Prior::Gamma { gamma: unit },
        1 => Prior::P0 { p0: unit },
        2 => Prior::Point,
        3 => Prior::Constant {
            beta: f64::from(value_seed) / 8.0,
        },
        _ => Prior::Constant {
            beta: f64::from(i16::from(value_seed) - 128),
        },
    }
}

fn build_value(mode_seed: u8, raw: f64, raw_seed: i16) -> f64 {
    match mode_seed % 8 {
        0 => raw,
        1 => f64::from(raw_seed.unsigned_abs() % 64),
        2 => f64::from(raw_seed) / 8.0,
        3 => 0.0,
        4 => -1.0,
        5 => f64::NAN,
        6 => f64::INFINITY,
        _ => f64::from(raw_seed),
    }
}

fn build_times(cursor: &mut common::ByteCursor<'_>, n: usize) -> Vec<f64> {
    let mut t = f64::from(cursor.next_i16()) / 4.0;
    (0..n)
        .map(|_| {
            let step_seed = cursor.next_u8();
            match step_seed % 13 {
                0 => {}
                1 => t -= 1.0,
                2 => t = f64::NAN,
                _ => t += f64::from(step_seed) / 32.0,
            }
            t
        })
        .collect()
}

fuzz_target!(|data: &[u8]| {
    let mut cursor = common::ByteCursor::new(data);

    let fitness = if cursor.next_u8() & 1 == 0 {
        FitnessKind::Events
    } else {
        FitnessKind::Measures
    };
    let prior = build_prior(cursor.next_u8(), cursor.next_u8());
    let Ok(config) = BlocksConfig::new(fitness, prior) else {
        return;
    };
    let Ok(blocks) = BayesianBlocks::new(config) else {
        return;
    };

    let n = common::bounded(cursor.next_u8(), 0, 64);
    let raw = common::decode_f64_chunks(&cursor.take_padded(n.saturating_mul(8)), 64);
    let times = build_times(&mut cursor, n);
    let values: Vec<f64> = (0..n)
        .map(|idx| {
            let raw_value = raw.get(idx).copied().unwrap_or(0.0);
            build_value(cursor.next_u8(), raw_value, cursor.next_i16())
        })
        .collect();
    let uncertainties: Vec<f64> = (0..n)
        .map(|_| match cursor.next_u8() % 6 {
            0 => 0.0,
            1 => -1.0,
            _ => 0.25 + f64::from(cursor.next_u8()) / 16.0,
        })
        .collect();

    let check = |result: Result<Vec<f64>, bblocks_core::BlocksError>, len: usize| {
        if let Ok(edges) = result {
            assert!(edges.len() >= 2 && edges.len() <= len + 1);
            assert!(edges.windows(2).all(|w| w[0] <= w[1]));
        }
    };

    match cursor.next_u8() % 3 {
        0 => {
            let unique = {
                let mut sorted = times.clone();
                sorted.dedup();
                sorted.len()
            };
            check(blocks.calculate_bins_events(&times), unique)
        }
        1 => check(blocks.calculate_bins_binned(&times, &values), n),
        _ => check(blocks.calculate_bins(&times, &values, &uncertainties), n),
    }
});
