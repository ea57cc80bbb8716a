// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

/// All `k`-element index subsets of `0..n`, in lexicographic order.
pub fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    if k > n {
        return Vec::new();
    }

    let mut result = Vec::new();
    let mut current: Vec<usize> = (0..k).collect();

    loop {
        result.push(current.clone());

        // Rightmost position that can still be advanced.
        let Some(pos) = (0..k).rev().find(|&i| current[i] < n - k + i) else {
            return result;
        };

        current[pos] += 1;
        for i in pos + 1..k {
            current[i] = current[i - 1] + 1;
        }
    }
}
