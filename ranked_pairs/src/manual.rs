/*!

This is the long-form manual for `ranked_pairs` and `tideman`.

## The method

Each ballot ranks every candidate exactly once. Incomplete ballots, weighted
ballots and write-in candidates are not supported.

1. **Preferences.** For every ordered pair of candidates `(A, B)`, count the
   ballots that rank `A` anywhere above `B`. Since every ballot is complete,
   `preferences(A, B) + preferences(B, A)` is always the number of ballots.
2. **Pairs.** For every two candidates, the one preferred by more ballots wins
   the pair. The strength of the pair is the margin of victory. Two candidates
   preferred by the same number of ballots do not form a pair.
3. **Sorting.** Pairs are sorted from the strongest to the weakest.
4. **Locking.** Going down the sorted list, the edge `winner -> loser` is added
   to the locked graph, unless the graph already contains a path from the
   loser back to the winner. Such a pair is skipped for good.
5. **Winner.** The winner is the candidate with no locked edge pointing at it.
   If several candidates are in this situation (for example when all the
   pairs are tied), there is no winner.

### Pairs of equal strength

The method does not say in which order pairs of equal strength should be
locked, and this order may change the winner in case of a cycle. Two
deterministic policies are available through [`crate::TieBreakMode`]:

* `ConstructionOrder` (default): equal pairs keep the order in which they are
  built, by increasing candidate indices. Registering the candidates in a
  different order may change the result.
* `Random(seed)`: equal pairs are ordered by a SHA-256 digest of the seed and
  the pair. The same seed always gives the same result.

## Command line

```text
tideman --input ballots.csv --candidates Alice,Bob,Charlie
tideman --config election.json --out summary.json
```

Without `--out`, a text report is printed. With `--out stdout` or a file path,
a JSON summary is written instead. The `--reference` option compares the JSON
summary with a previous one and fails if they differ.

## Input formats

### `csv`

One ballot per row, one rank per column, each cell holding a candidate name,
the most preferred first. The first rows may be skipped with
`firstVoteRowIndex` (1-based, like a spreadsheet row number) and the first
columns with `firstVoteColumnIndex`. A row with a blank cell is an incomplete
ballot and is skipped with a warning.

### `json`

An array of ballots, each ballot being an array of candidate names:

```json
[["Alice", "Bob", "Charlie"], ["Bob", "Charlie", "Alice"]]
```

### Configuration file

```json
{
  "outputSettings": { "contestName": "Club president" },
  "candidates": [{ "name": "Alice" }, { "name": "Bob" }, { "name": "Charlie" }],
  "cvrFileSources": [{ "provider": "csv", "filePath": "ballots.csv", "firstVoteRowIndex": 2 }],
  "rules": { "tiebreakMode": "constructionOrder" }
}
```

The file paths are relative to the configuration file. The tiebreak mode can
also be `random`, in which case `randomSeed` is required.
*/
