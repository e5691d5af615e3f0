/*!

This is the long-form manual for `primary_order` and `primaryorder`.

## Input formats

The input is a table with one row per state and a header row. The columns are
found by name, in any order, and other columns are ignored:
* `State` the name of the state
* `Dem` the number of votes for the first party in the previous election
* `Rep` the number of votes for the second party in the previous election
* `EC` the number of electoral college votes of the state

The following formats are supported:
* `csv` Comma Separated Values (the default)
* `xlsx` Excel spreadsheet. By default the first worksheet is read, another one can
  be chosen with `--excel-worksheet-name`.

The vote counts and the electoral votes must be non-negative integers. A state in
which neither party received a vote cannot be scored: the whole input is then
rejected, and nothing is ranked.

## Scoring

The delta of a state is the gap between the two parties, relative to the number
of votes they received together:

```text
delta = |dem - rep| / (dem + rep)
```

It is 0 for a perfect tie and gets closer to 1 as the race gets more one-sided.

Two methodologies are available:

### `delta`

The default. Only the closeness of the race matters:

```text
score = 10 * (1 - delta)
```

### `delta_ec`

The share of the state in the electoral college is added to the closeness of the
race:

```text
score = 10 * (ec / total_ec + 1 - delta)
```

where `total_ec` is the sum of the electoral votes of all the states in the input.
The two terms are added as they are: a close race and a large weight count the same.
A state with no electoral vote gets no bonus.

## Ranking

The states are sorted by decreasing score. States with the same score are kept in the
order of the input.

## Output

The ranking is printed as a table:

```text
NAME (EC)               SCORE    DELTA
______________________________________
B (20)                   9.80    2.00%
A (10)                   8.00   20.00%
```

Names longer than 20 characters (including the electoral votes) are cut.

With `--out`, a summary of the ranking is also written in JSON format, either to a
file or to the standard output with `--out stdout`.

With `--reference`, the printed table is compared to the content of a reference file.
Any difference is displayed and the program fails.

## Configuration file

All the options can also be stored in a JSON file passed with `--config`:

```json
{
  "source": {
    "provider": "csv",
    "filePath": "election2016.csv"
  },
  "method": "delta_ec",
  "outputSettings": {
    "outputPath": "ranking.json"
  }
}
```

The path of the input is relative to the directory of the configuration file.
Options passed on the command line take precedence over the configuration file.

*/
