#[cfg(test)]
#[allow(clippy::module_inception)]
mod tests {
    use crate::{
        decode_cursor, encode_cursor, parse_filters, Filter, FilterError, FilterOp, FilterSpec,
        PageError, PageResult, ReportField,
    };

    #[test]
    fn test_cursor_is_base64_of_decimal_position() {
        assert_eq!(encode_cursor(0), "MA==");
        assert_eq!(encode_cursor(10), "MTA=");
        assert_eq!(decode_cursor("MTA=").unwrap(), 10);
    }

    #[test]
    fn test_cursor_decode_rejects_garbage() {
        assert!(matches!(
            decode_cursor("not base64!"),
            Err(PageError::InvalidCursor(_))
        ));
        // base64("abc")
        assert!(matches!(
            decode_cursor("YWJj"),
            Err(PageError::InvalidCursor(_))
        ));
        // base64("-1")
        assert!(matches!(
            decode_cursor("LTE="),
            Err(PageError::InvalidCursor(_))
        ));
    }

    #[test]
    fn test_field_names_are_exact() {
        assert_eq!(
            ReportField::from_api_name("InputIndex"),
            Some(ReportField::InputIndex)
        );
        assert_eq!(
            ReportField::from_api_name("OutputIndex"),
            Some(ReportField::OutputIndex)
        );
        assert_eq!(ReportField::from_api_name("inputindex"), None);
        assert_eq!(ReportField::from_api_name("Foo"), None);
    }

    #[test]
    fn test_parse_equality_filter() {
        let f = Filter::try_from(&FilterSpec::eq("InputIndex", "5")).unwrap();
        assert_eq!(f.field, ReportField::InputIndex);
        assert_eq!(f.value(), 5);
    }

    #[test]
    fn test_unknown_field_is_reported_before_operator() {
        let spec = FilterSpec {
            field: "Foo".into(),
            gt: Some("1".into()),
            ..Default::default()
        };
        assert_eq!(
            Filter::try_from(&spec),
            Err(FilterError::UnknownField("Foo".into()))
        );
    }

    #[test]
    fn test_missing_operator_is_unsupported() {
        let spec = FilterSpec {
            field: "OutputIndex".into(),
            ..Default::default()
        };
        let err = Filter::try_from(&spec).unwrap_err();
        assert_eq!(
            err,
            FilterError::UnsupportedOperation {
                field: ReportField::OutputIndex,
                op: None
            }
        );
        assert_eq!(err.to_string(), "unsupported operation on OutputIndex: none");
    }

    #[test]
    fn test_non_equality_operators_are_unsupported() {
        let spec = FilterSpec {
            field: "InputIndex".into(),
            eq: Some("1".into()),
            ne: Some("2".into()),
            ..Default::default()
        };
        assert_eq!(
            Filter::try_from(&spec),
            Err(FilterError::UnsupportedOperation {
                field: ReportField::InputIndex,
                op: Some(FilterOp::Ne)
            })
        );

        let spec = FilterSpec {
            field: "InputIndex".into(),
            in_list: Some(vec!["1".into()]),
            ..Default::default()
        };
        assert!(matches!(
            Filter::try_from(&spec),
            Err(FilterError::UnsupportedOperation {
                op: Some(FilterOp::In),
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_values() {
        for bad in ["abc", "-1", "", "1.5", "99999999999999999999"] {
            let err = Filter::try_from(&FilterSpec::eq("InputIndex", bad)).unwrap_err();
            assert!(
                matches!(err, FilterError::InvalidValue { .. }),
                "{bad:?} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_filters_keeps_order_and_stops_at_first_error() {
        let specs = vec![
            FilterSpec::eq("OutputIndex", "2"),
            FilterSpec::eq("InputIndex", "7"),
        ];
        let parsed = parse_filters(&specs).unwrap();
        assert_eq!(parsed[0].field, ReportField::OutputIndex);
        assert_eq!(parsed[1].field, ReportField::InputIndex);

        let specs = vec![
            FilterSpec::eq("Foo", "1"),
            FilterSpec {
                field: "InputIndex".into(),
                ..Default::default()
            },
        ];
        assert_eq!(
            parse_filters(&specs),
            Err(FilterError::UnknownField("Foo".into()))
        );
    }

    #[test]
    fn test_filter_spec_json_shape() {
        let spec: FilterSpec =
            serde_json::from_value(serde_json::json!({"field": "InputIndex", "eq": "3"})).unwrap();
        assert_eq!(spec, FilterSpec::eq("InputIndex", "3"));

        let spec: FilterSpec =
            serde_json::from_value(serde_json::json!({"field": "InputIndex", "in": ["1", "2"]}))
                .unwrap();
        assert_eq!(spec.in_list, Some(vec!["1".to_string(), "2".to_string()]));

        let res: Result<FilterSpec, _> =
            serde_json::from_value(serde_json::json!({"field": "InputIndex", "like": "3"}));
        assert!(res.is_err());
    }

    #[test]
    fn test_page_result_relay_helpers() {
        let page = PageResult::new(vec!["a", "b", "c"], 10, 4);
        assert_eq!(page.start_cursor(), Some(encode_cursor(4)));
        assert_eq!(page.end_cursor(), Some(encode_cursor(6)));
        assert!(page.has_next_page());
        assert!(page.has_previous_page());

        let edges: Vec<_> = page.edges().collect();
        assert_eq!(edges[1], (encode_cursor(5), &"b"));

        let last = PageResult::new(vec![1, 2], 2, 0);
        assert!(!last.has_next_page());
        assert!(!last.has_previous_page());

        let empty: PageResult<u8> = PageResult::empty(0, 0);
        assert_eq!(empty.start_cursor(), None);
        assert_eq!(empty.end_cursor(), None);
    }

    #[test]
    fn test_map_rows_preserves_metadata() {
        let page = PageResult::new(vec![1, 2], 5, 3).map_rows(|n| n * 10);
        assert_eq!(page.rows, vec![10, 20]);
        assert_eq!(page.total, 5);
        assert_eq!(page.offset, 3);
    }
}
