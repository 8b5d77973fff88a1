#[cfg(test)]
mod store_format_tests {
    use serde_json::json;

    /// The closet file holds two co-indexed sequences plus the
    /// dimension they were recorded at.
    #[test]
    fn test_closet_blob_shape() {
        let blob = json!({
            "dimension": 4,
            "vectors": [
                [0.1, 0.2, 0.3, 0.4],
                [0.5, 0.6, 0.7, 0.8]
            ],
            "labels": ["denim jacket", "rain boots"]
        });

        let vectors = blob["vectors"].as_array().unwrap();
        let labels = blob["labels"].as_array().unwrap();

        assert_eq!(vectors.len(), labels.len());
        for vector in vectors {
            assert_eq!(
                vector.as_array().unwrap().len(),
                blob["dimension"].as_u64().unwrap() as usize
            );
        }
    }

    /// An empty closet still round-trips through the same shape
    #[test]
    fn test_empty_closet_blob() {
        let blob = json!({
            "dimension": 2048,
            "vectors": [],
            "labels": []
        });

        let serialized = serde_json::to_string(&blob).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&serialized).unwrap();

        assert!(parsed["vectors"].as_array().unwrap().is_empty());
        assert!(parsed["labels"].as_array().unwrap().is_empty());
    }

    /// Labels keep insertion order through serialization
    #[test]
    fn test_label_order_preserved() {
        let blob = json!({
            "dimension": 1,
            "vectors": [[1.0], [2.0], [3.0]],
            "labels": ["first", "second", "third"]
        });

        let serialized = serde_json::to_string(&blob).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&serialized).unwrap();
        let labels: Vec<&str> = parsed["labels"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();

        assert_eq!(labels, ["first", "second", "third"]);
    }
}
