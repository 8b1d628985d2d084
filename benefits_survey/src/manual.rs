/*!

This is the long-form manual for `benefits_survey` and `warbenefits`.

## Input formats

The following formats are supported:
* `xlsx` Excel workbook, as exported from the online survey
* `csv` Comma Separated Values, with the same columns

Both formats are expected to have a header row followed by one row per respondent, with
exactly five columns in this order:

| column | content |
|--------|---------|
| 1      | the company of the respondent |
| 2      | the benefits received, separated by commas |
| 3      | an additional comment (not used) |
| 4      | whether the respondent received nothing (not used) |
| 5      | the number of benefits (ignored, it is always recomputed) |

The text of the header row does not matter, only the position of the columns.

### Cleaning rules

The benefits are split on commas and each benefit is trimmed. The labels `כלום` (nothing)
and `פיטורים` (laid off) are not benefits and are removed. A respondent who only wrote
these labels has no benefits, just like a respondent who left the column empty.

Rows whose company is `Unknown` (or `Uknown`, as spelled in the survey export) are
dropped entirely.

## Views

* `overview` the smallest and largest number of benefits reported by a respondent, and
  how often each benefit is reported. The percentages are computed against all the
  respondents, including the ones who reported nothing.
* `company` the benefits reported for one company (`--company`), and optionally a
  comparison with a second one (`--compare`).
* `leaderboard` the five companies with the most and the fewest benefits. A company is
  ranked by the largest number of benefits reported by one of its respondents.
* `quotes` a fixed selection of what the respondents said.
* `all` all of the above (default).

## Configuration

`warbenefits` comes with sensible defaults but the labels used by the survey can be changed
with a configuration file in JSON:

```json
{
  "outputSettings": { "title": "Work at war", "outputPath": "summary.json" },
  "dataSource": {
    "provider": "xlsx",
    "filePath": "Work_at_war_data.xlsx",
    "excelWorksheetName": "Sheet1"
  },
  "rules": {
    "nothingLabel": "כלום",
    "laidOffLabel": "פיטורים",
    "excludedCompanies": ["Unknown", "Uknown"]
  }
}
```

Only `dataSource.filePath` is mandatory. A relative path is resolved from the directory
of the configuration file. The options passed on the command line take precedence over
the configuration file.

 */
