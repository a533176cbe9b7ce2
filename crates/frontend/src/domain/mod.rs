pub mod a001_classe;
pub mod a002_salle;
pub mod a003_eleve;
pub mod a004_personnel;
pub mod a005_matiere;
pub mod a006_evaluation;
pub mod a007_coefficient;
