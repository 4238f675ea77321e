mod property_roundtrip;
mod property_two_pass;
