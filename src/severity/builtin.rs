//! Bundled reference catalog.
//!
//! Entry order is preserved by the catalog and breaks ties between
//! equally long fragments, so more specific fragments are listed first
//! within each section.

use crate::models::enums::Priority::{self, High, Medium, Routine};

use super::types::{ReferenceBand, ReferenceEntry};

fn entry(
    fragment: &str,
    male: Option<[f64; 2]>,
    female: Option<[f64; 2]>,
    unit: &str,
    category: &str,
    specialist: &str,
    priority: Priority,
) -> ReferenceEntry {
    ReferenceEntry {
        fragment: fragment.to_string(),
        male: male.map(ReferenceBand::from),
        female: female.map(ReferenceBand::from),
        unit: unit.to_string(),
        category: category.to_string(),
        specialist: specialist.to_string(),
        priority,
        purpose: None,
        qualitative: false,
    }
}

/// Numeric test with separate male/female bands.
fn num(
    fragment: &str,
    male: [f64; 2],
    female: [f64; 2],
    unit: &str,
    category: &str,
    specialist: &str,
    priority: Priority,
) -> ReferenceEntry {
    entry(fragment, Some(male), Some(female), unit, category, specialist, priority)
}

/// Numeric test with one band for both sexes.
fn both(
    fragment: &str,
    band: [f64; 2],
    unit: &str,
    category: &str,
    specialist: &str,
    priority: Priority,
) -> ReferenceEntry {
    num(fragment, band, band, unit, category, specialist, priority)
}

/// Detected / not-detected marker.
fn binary(fragment: &str, category: &str, specialist: &str) -> ReferenceEntry {
    ReferenceEntry {
        qualitative: true,
        ..entry(fragment, None, None, "Binary", category, specialist, High)
    }
}

pub(crate) fn builtin_entries() -> Vec<ReferenceEntry> {
    const HEME: &str = "Hematology";
    const BIO: &str = "Biochemistry";
    const LFT: &str = "LFT";
    const TOX: &str = "Toxicology";
    const AUTO: &str = "Autoimmune";
    const INF: &str = "Infectious Disease";
    const NEURO: &str = "Neurological";
    const ONC: &str = "Oncology";
    const GEN: &str = "Genetics";
    const FERT: &str = "Fertility";
    const PED: &str = "Pediatric";
    const CARD: &str = "Cardiac";
    const LIPID: &str = "Lipids";
    const LYTE: &str = "Electrolytes";
    const THY: &str = "Thyroid";
    const VIT: &str = "Vitamins";

    vec![
        // Hematology
        both("wbc", [4.0, 11.0], "x10^9/L", HEME, "Hematologist", Medium)
            .with_purpose("Leukocyte count. High indicates infection/inflammation."),
        num("rbc", [4.5, 5.9], [4.1, 5.1], "x10^12/L", HEME, "Hematologist", Routine)
            .with_purpose("Red blood cell count. Low indicates anemia."),
        num("hemoglobin a1c", [4.0, 5.6], [4.0, 5.6], "%", BIO, "Endocrinologist", High)
            .with_purpose("Average sugar."),
        num("hemoglobin", [13.2, 16.6], [11.6, 15.0], "g/dL", HEME, "Hematologist", High)
            .with_purpose("Oxygen carrying protein."),
        num("haemoglobin", [13.2, 16.6], [11.6, 15.0], "g/dL", HEME, "Hematologist", High),
        num("hematocrit", [38.3, 48.6], [35.5, 44.9], "%", HEME, "Hematologist", Routine)
            .with_purpose("Packed cell volume (PCV)."),
        num("pcv", [38.3, 48.6], [35.5, 44.9], "%", HEME, "Hematologist", Routine),
        both("platelet", [150.0, 450.0], "x10^9/L", HEME, "Hematologist", High)
            .with_purpose("Thrombocyte count. Essential for clotting."),
        num("esr", [0.0, 22.0], [0.0, 29.0], "mm/hr", HEME, "Rheumatologist", Routine)
            .with_purpose("Erythrocyte Sedimentation Rate. Inflammation marker."),
        both("reticulocyte", [0.5, 2.5], "%", HEME, "Hematologist", Routine)
            .with_purpose("Immature red blood cell count."),
        both("mcv", [80.0, 100.0], "fL", HEME, "Hematologist", Routine)
            .with_purpose("Mean Corpuscular Volume. Sizing of RBCs."),
        both("mchc", [32.0, 36.0], "g/dL", HEME, "Hematologist", Routine)
            .with_purpose("Mean Corpuscular Hemoglobin Conc."),
        both("mch", [27.0, 33.0], "pg", HEME, "Hematologist", Routine)
            .with_purpose("Mean Corpuscular Hemoglobin."),
        both("anc", [1500.0, 7500.0], "cells/mcL", HEME, "Hematologist", High)
            .with_purpose("Absolute Neutrophil Count."),
        both("alc", [1300.0, 3500.0], "cells/mcL", HEME, "Hematologist", Medium)
            .with_purpose("Absolute Lymphocyte Count."),
        both("absolute monocyte", [200.0, 950.0], "cells/mcL", HEME, "Hematologist", Routine),
        both("absolute eosinophil", [0.0, 500.0], "cells/mcL", HEME, "Allergist", Routine),
        both("absolute basophil", [0.0, 300.0], "cells/mcL", HEME, "Hematologist", Routine),
        both("segmented neutrophils", [50.0, 62.0], "%", HEME, "Hematopathologist", Medium),
        both("mpv", [7.8, 11.0], "fL", HEME, "Hematologist", Routine)
            .with_purpose("Mean Platelet Volume."),
        both("pct", [0.12, 0.50], "%", HEME, "Hematologist", Routine).with_purpose("Plateletcrit."),
        both("pdw", [9.0, 17.0], "%", HEME, "Hematologist", Routine)
            .with_purpose("Platelet Distribution Width."),
        both("rdw-cv", [11.0, 15.0], "%", HEME, "Hematologist", Routine),
        both("rdw-sd", [39.0, 46.0], "fL", HEME, "Hematologist", Routine),
        // Biochemistry & diabetes
        both("fasting glucose", [70.0, 99.0], "mg/dL", BIO, "Endocrinologist", High)
            .with_purpose("Diabetes screening."),
        both("random glucose", [80.0, 140.0], "mg/dL", BIO, "Endocrinologist", High),
        both("glucose", [70.0, 140.0], "mg/dL", BIO, "Endocrinologist", High),
        both("hba1c", [4.0, 5.6], "%", BIO, "Endocrinologist", High).with_purpose("Average sugar."),
        both("insulin", [2.0, 25.0], "uIU/mL", BIO, "Endocrinologist", Medium),
        both("c-peptide", [0.5, 2.0], "ng/mL", BIO, "Endocrinologist", Medium),
        num("creatinine", [0.7, 1.3], [0.6, 1.1], "mg/dL", BIO, "Nephrologist", High),
        both("urea", [15.0, 50.0], "mg/dL", BIO, "Nephrologist", Medium),
        both("bun", [7.0, 20.0], "mg/dL", BIO, "Nephrologist", Medium),
        num("uric acid", [3.4, 7.0], [2.4, 6.0], "mg/dL", BIO, "Rheumatologist", Medium),
        both("total protein", [6.0, 8.3], "g/dL", BIO, "Internal Medicine", Routine),
        // Liver function
        both("ast", [8.0, 48.0], "U/L", LFT, "Hepatologist", Medium),
        both("alt", [7.0, 56.0], "U/L", LFT, "Hepatologist", Medium),
        both("alp", [40.0, 129.0], "U/L", LFT, "Gastroenterologist", Medium),
        both("ggt", [9.0, 48.0], "U/L", LFT, "Hepatologist", Routine),
        both("total bilirubin", [0.3, 1.9], "mg/dL", LFT, "Hepatologist", Medium),
        both("direct bilirubin", [0.0, 0.3], "mg/dL", LFT, "Hepatologist", Medium),
        both("albumin", [3.5, 5.5], "g/dL", LFT, "Hepatologist", Routine),
        both("globulin", [2.0, 3.5], "g/dL", LFT, "Hepatologist", Routine),
        both("ldh", [140.0, 280.0], "U/L", LFT, "Hepatologist", Routine),
        // Cardiac, lipids, electrolytes, thyroid, vitamins
        both("crp", [0.0, 10.0], "mg/L", CARD, "Cardiologist", High)
            .with_purpose("C-Reactive Protein. Inflammation marker."),
        both("troponin", [0.0, 0.04], "ng/mL", CARD, "Cardiologist", High)
            .with_purpose("Cardiac muscle injury marker."),
        both("total cholesterol", [100.0, 200.0], "mg/dL", LIPID, "Cardiologist", Medium),
        num("hdl cholesterol", [40.0, 100.0], [50.0, 100.0], "mg/dL", LIPID, "Cardiologist", Medium),
        both("ldl cholesterol", [50.0, 130.0], "mg/dL", LIPID, "Cardiologist", Medium),
        both("cholesterol", [100.0, 200.0], "mg/dL", LIPID, "Cardiologist", Medium),
        both("triglycerides", [40.0, 150.0], "mg/dL", LIPID, "Cardiologist", Medium),
        both("sodium", [135.0, 145.0], "mmol/L", LYTE, "Nephrologist", High),
        both("potassium", [3.5, 5.1], "mmol/L", LYTE, "Nephrologist", High),
        both("calcium", [8.5, 10.5], "mg/dL", LYTE, "Endocrinologist", Medium),
        both("tsh", [0.4, 4.0], "mIU/L", THY, "Endocrinologist", Medium)
            .with_purpose("Thyroid Stimulating Hormone."),
        both("vitamin d", [30.0, 100.0], "ng/mL", VIT, "General Physician", Routine),
        both("vitamin b12", [200.0, 900.0], "pg/mL", VIT, "General Physician", Routine),
        // Toxicology & drug screening
        both("noroxycodone", [0.0, 50.0], "ng/mL", TOX, "Toxicologist", High)
            .with_purpose("Oxycodone metabolite."),
        both("oxycodone", [0.0, 50.0], "ng/mL", TOX, "Toxicologist", High),
        both("morphine", [0.0, 95.0], "ng/mL", TOX, "Toxicologist", High),
        both("oxymorphone", [0.0, 50.0], "ng/mL", TOX, "Toxicologist", High),
        both("ethyl sulfate", [0.0, 200.0], "ng/mL", TOX, "Addiction Medicine Specialist", Medium)
            .with_purpose("Alcohol metabolite (EtS)."),
        both("ets", [0.0, 200.0], "ng/mL", TOX, "Addiction Medicine Specialist", Medium),
        both("ethyl glucuronide", [0.0, 500.0], "ng/mL", TOX, "Addiction Medicine Specialist", Medium)
            .with_purpose("Alcohol metabolite (EtG)."),
        both("etg", [0.0, 500.0], "ng/mL", TOX, "Addiction Medicine Specialist", Medium),
        both("thc", [0.0, 50.0], "ng/mL", TOX, "Addiction Medicine Specialist", High)
            .with_purpose("Cannabis screening."),
        both("opiates", [0.0, 300.0], "ng/mL", TOX, "Toxicologist", High),
        both("urine ph", [5.0, 9.0], "pH", "Urinalysis", "Urologist", Routine),
        both("specific gravity", [1.003, 1.030], "sg", "Urinalysis", "Nephrologist", Routine),
        both("oxidants", [0.0, 200.0], "ug/mL", TOX, "Toxicologist", Medium),
        both("benzodiazepines", [0.0, 200.0], "ng/mL", TOX, "Addiction Medicine Specialist", High),
        both("barbiturates", [0.0, 200.0], "ng/mL", TOX, "Toxicologist", High),
        both("fentanyl", [0.0, 1.0], "ng/mL", TOX, "Toxicologist", High),
        both("methadone", [0.0, 300.0], "ng/mL", TOX, "Addiction Medicine Specialist", High),
        both("mdma", [0.0, 500.0], "ng/mL", TOX, "Toxicologist", High),
        both("lsd", [0.0, 0.5], "ng/mL", TOX, "Toxicologist", High),
        both("cocaine", [0.0, 150.0], "ng/mL", TOX, "Toxicologist", High),
        both("ketamine", [0.0, 50.0], "ng/mL", TOX, "Toxicologist", High),
        // Autoimmune & rheumatology
        both("ana", [0.0, 1.0], "titer/index", AUTO, "Rheumatologist", High)
            .with_purpose("Antinuclear Antibody. Lupus screening."),
        both("anti-dsdna", [0.0, 30.0], "IU/mL", AUTO, "Rheumatologist", High),
        both("anti-ccp", [0.0, 20.0], "U/mL", AUTO, "Rheumatologist", High)
            .with_purpose("Rheumatoid Arthritis marker."),
        both("rf", [0.0, 14.0], "IU/mL", AUTO, "Rheumatologist", Medium)
            .with_purpose("Rheumatoid Factor."),
        binary("hla-b27", AUTO, "Rheumatologist"),
        both("complement c3", [80.0, 180.0], "mg/dL", AUTO, "Immunologist", Medium),
        both("complement c4", [15.0, 45.0], "mg/dL", AUTO, "Immunologist", Medium),
        both("anti-smith", [0.0, 1.0], "Index", AUTO, "Rheumatologist", High),
        both("anti-mitochondrial", [0.0, 0.1], "Titer", AUTO, "Hepatologist", High),
        // Infectious disease
        both("hiv viral load", [0.0, 20.0], "copies/mL", INF, "HIV/AIDS Care Specialist", High),
        binary("hbsag", INF, "Hepatologist"),
        both("hbv-dna", [0.0, 10.0], "IU/mL", INF, "Hepatologist", High),
        both("hcv rna", [0.0, 15.0], "IU/mL", INF, "Hepatologist", High),
        both("tb quantiferon", [0.0, 0.35], "IU/mL", INF, "Pulmonologist", High),
        binary("malaria pcr", INF, "Travel & Tropical Medicine Expert"),
        both("leptospira", [0.0, 1.0], "Index", INF, "Infectious Disease Specialist", Medium),
        both("brucella", [0.0, 1.0], "Index", INF, "Infectious Disease Specialist", Medium),
        binary("chlamydia", INF, "Sexual Medicine Specialist"),
        binary("gonorrhea", INF, "Sexual Medicine Specialist"),
        both("syphilis", [0.0, 1.0], "Index/Titer", INF, "Infectious Disease Specialist", High),
        both("hsv 1", [0.0, 0.9], "Index", INF, "Infectious Disease Specialist", Medium),
        both("hsv 2", [0.0, 0.9], "Index", INF, "Infectious Disease Specialist", Medium),
        // Neurological
        both("csf glucose", [40.0, 70.0], "mg/dL", NEURO, "Neurologist", High),
        both("csf protein", [15.0, 45.0], "mg/dL", NEURO, "Neurologist", High),
        both("tau protein", [0.0, 300.0], "pg/mL", NEURO, "Geriatric Specialist", High)
            .with_purpose("Alzheimer marker."),
        both("amyloid beta", [500.0, 1500.0], "pg/mL", NEURO, "Neurologist", High),
        both("nse", [0.0, 16.3], "ng/mL", NEURO, "Oncologist", Medium)
            .with_purpose("Neuron Specific Enolase."),
        both("myelin basic protein", [0.0, 4.0], "ng/mL", NEURO, "Neurologist", High),
        // Oncology & genetics
        entry("psa", Some([0.0, 4.0]), None, "ng/mL", ONC, "Urologist", High),
        both("ca-125", [0.0, 35.0], "U/mL", ONC, "Gynecologist", High),
        both("cea", [0.0, 3.0], "ng/mL", ONC, "Oncologist", High),
        both("afp", [0.0, 8.0], "ng/mL", ONC, "Hepatologist", High),
        binary("brca1", GEN, "Clinical Geneticist"),
        binary("brca2", GEN, "Clinical Geneticist"),
        binary("kras mutation", GEN, "Molecular Pathologist"),
        binary("nras mutation", GEN, "Molecular Pathologist"),
        binary("tp53", GEN, "Molecular Pathologist"),
        binary("egfr mutation", GEN, "Pulmonary Critical Care Specialist"),
        both("her2/neu", [0.0, 1.0], "Index", ONC, "Breast Cancer Surgeon", High),
        // Reproductive & fertility
        both("amh", [0.7, 7.0], "ng/mL", FERT, "IVF & Fertility Consultant", Medium)
            .with_purpose("Anti-Mullerian Hormone."),
        num("fsh", [1.5, 12.4], [4.7, 21.5], "mIU/mL", FERT, "Reproductive Endocrinologist", Medium),
        num("lh", [1.7, 8.6], [2.4, 12.6], "mIU/mL", FERT, "Reproductive Endocrinologist", Medium),
        num("progesterone", [0.0, 1.0], [0.1, 25.0], "ng/mL", FERT, "Obstetrician (OB/GYN)", Medium),
        num("estradiol", [10.0, 50.0], [30.0, 400.0], "pg/mL", FERT, "Gynecologist", Medium),
        num("shbg", [10.0, 80.0], [20.0, 130.0], "nmol/L", FERT, "Andrologist", Routine),
        // Pediatric & neonatal
        binary("newborn screening", PED, "Neonatal Intensivist"),
        both("g6pd", [7.0, 20.5], "U/g Hb", PED, "Pediatric Hematologist", High),
        both("pku", [0.0, 2.0], "mg/dL", PED, "Clinical Geneticist", High),
        both("neonatal bilirubin", [0.1, 12.0], "mg/dL", PED, "Neonatologist", High),
        both("irt", [0.0, 70.0], "ng/mL", PED, "Pediatric Endocrinologist", High)
            .with_purpose("Cystic Fibrosis screening."),
    ]
}
