/*!

This is the long-form manual for `farm_project` and the `hfv` command line tool.

## Workbook format

The workbook exported by the farm management software is read from the sheet
`Daten` (or the first sheet if there is no sheet with that name).

| Cell   | Content        |
|--------|----------------|
| `B1`   | street         |
| `B2`   | house number   |
| `B3`   | postal code    |
| `B4`   | city           |
| `B5`   | project number |
| `B6`   | e-mail         |

The housing units are in the rows 9 to 50, one unit per row:

| Column | Content                                   |
|--------|-------------------------------------------|
| `A`    | unit id (`BE-Nr.`)                        |
| `B`    | animal category, current state            |
| `C`    | animal places, current state              |
| `D`    | execution, current state                  |
| `E`    | exhaust chimneys (`Ja` / `Nein`)          |
| `F`    | state of the art (`Ja` / `Nein`)          |
| `G`    | animal category, planned state            |
| `H`    | animal places, planned state              |
| `I`    | execution, planned state                  |

A row is read if it has a unit id or a current animal category. Every other
cell may be missing:
- categories default to `Mastschweine`
- animal places default to 0 (also when the cell is not a number)
- the execution may be given as `1` to `4` and defaults to `1 - Zwangsbelüfteter Stall`
- chimneys and state of the art default to `Nein`

## Ratings

Each topic gets an effort and a difficulty rating on the traffic-light scale
`green` < `yellow` < `red`. The licensing topic has no difficulty: its
difficulty is always `Kein Einfluss`.

## Project files

`hfv extract` writes a project as JSON and `hfv render` reads it back. All keys are
in camelCase and every key is optional:

```text
{
  "street": "Hauptstr.",
  "houseNumber": "5",
  "postalCode": "12345",
  "city": "Musterstadt",
  "projectNumber": "P-001",
  "summaryText": "...",
  "receptorSites": {"effort": "yellow", "difficulty": "green", "effortReason": "..."},
  "currentState": [{"unitId": "BE1", "category": "Mastschweine", "capacity": 100,
                    "execution": "1 - Zwangsbelüfteter Stall", "chimneys": "Ja",
                    "stateOfTheArt": "Nein"}],
  "plannedState": [{"unitId": "BE1", "category": "Mastschweine", "capacity": 120,
                    "execution": "2 - Zwangsbelüfteter Stall mit Auslauf"}],
  "review": {"mitigationMeasures": "Eher ja"}
}
```

## Configuration

`hfv` comes with defaults for everything. A JSON configuration file can
override them:

```text
{
  "workbook": {"sheetName": "Daten"},
  "geocoder": {"endpoint": "https://nominatim.openstreetmap.org", "timeoutSecs": 10},
  "map": {"scale": 2047},
  "layout": {"program": "weasyprint", "args": ["-", "-"]}
}
```

The `layout` section names the program that turns the HTML report into a PDF.
It receives the HTML on its standard input and must write the PDF to its
standard output.

 */
