pub mod mockdata_credex;
