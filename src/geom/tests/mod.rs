mod test_properties;
