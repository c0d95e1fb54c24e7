//! The fixed stage table of the tagging pipeline.
//!
//! Each stage tags one status column. Stages run in order, and every status
//! column is anchored directly after a column written by an earlier stage,
//! so the table accumulates its annotations left to right in pipeline order.
//! Stages whose direct predecessor can legitimately be absent carry fallback
//! anchors, tried in priority order.

/// One stage of the tagging pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSpec {
    /// Short identifier used on the command line.
    pub name: &'static str,
    /// Status column written into the table.
    pub column: &'static str,
    /// Label for hosts present in the reference set.
    pub yes_label: &'static str,
    /// Label for hosts absent from the reference set.
    pub no_label: &'static str,
    /// Anchor candidates, highest priority first. The status column lands
    /// directly after the first candidate found in the header.
    pub anchors: &'static [&'static str],
    /// Default reference export file name under the data directory.
    pub reference_file: &'static str,
}

/// All pipeline stages, in execution order.
pub const STAGES: &[StageSpec] = &[
    StageSpec {
        name: "not-reporting",
        column: "Not reporting to BigFix",
        yes_label: "Not Reporting",
        no_label: "Reporting",
        anchors: &["Computer Name"],
        reference_file: "021_notrep.csv",
    },
    StageSpec {
        name: "cmdb-status",
        column: "CMDB Status",
        yes_label: "In CMDB",
        no_label: "Not in CMDB",
        anchors: &["Not reporting to BigFix"],
        reference_file: "023_CMDB_active.csv",
    },
    StageSpec {
        name: "delayed-upload",
        column: "Delayed Data Upload",
        yes_label: "YES",
        no_label: "NO",
        anchors: &["CMDB Status"],
        reference_file: "001_Delayed Data Upload.csv",
    },
    StageSpec {
        name: "failed-scan",
        column: "Failed Scan",
        yes_label: "YES",
        no_label: "NO",
        anchors: &["Delayed Data Upload"],
        reference_file: "005_Failed Scan.csv",
    },
    StageSpec {
        name: "missing-scan",
        column: "Missing Scan",
        yes_label: "YES",
        no_label: "NO",
        anchors: &["Failed Scan", "Delayed Data Upload"],
        reference_file: "006_Missing Scan.csv",
    },
    StageSpec {
        name: "scan-not-uploaded",
        column: "Scan Not Uploaded",
        yes_label: "YES",
        no_label: "NO",
        anchors: &["Missing Scan"],
        reference_file: "007_Scan Not Uploaded.csv",
    },
    StageSpec {
        name: "no-scan-data",
        column: "No Scan Data",
        yes_label: "YES",
        no_label: "NO",
        anchors: &["Scan Not Uploaded"],
        reference_file: "010_No Scan Data.csv",
    },
    StageSpec {
        name: "no-vm-manager-data",
        column: "No VM Manager Data",
        yes_label: "YES",
        no_label: "NO",
        anchors: &[
            "No Scan Data",
            "Scan Not Uploaded",
            "Missing Scan",
            "Failed Scan",
            "Delayed Data Upload",
        ],
        reference_file: "011_No VM Manager Data.csv",
    },
    StageSpec {
        name: "outdated-vm-manager-data",
        column: "Outdated VM Manager Data",
        yes_label: "YES",
        no_label: "NO",
        anchors: &[
            "No VM Manager Data",
            "No Scan Data",
            "Scan Not Uploaded",
            "Missing Scan",
            "Failed Scan",
            "Delayed Data Upload",
        ],
        reference_file: "012_Outdated VM Manager Data.csv",
    },
    StageSpec {
        name: "outdated-scan",
        column: "Outdated Scan",
        yes_label: "YES",
        no_label: "NO",
        anchors: &[
            "Outdated VM Manager Data",
            "No VM Manager Data",
            "No Scan Data",
            "Scan Not Uploaded",
            "Missing Scan",
            "Failed Scan",
            "Delayed Data Upload",
        ],
        // The upstream export really is named "Outeted".
        reference_file: "013_Outeted Scan.csv",
    },
];

/// Look up a stage by its command-line name.
pub fn find_stage(name: &str) -> Option<&'static StageSpec> {
    STAGES.iter().find(|s| s.name == name)
}
