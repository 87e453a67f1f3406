//! Signing integration tests.

#[cfg(test)]
mod tests {
    use crate::{
        CLIENT_IP, EXPIRES, PATH_PREFIX, RESOURCE_URL, USER_AGENT, conditions, expected_prefix,
        test_signer,
    };

    #[test]
    fn test_should_sign_without_conditions() {
        let signed = test_signer(false)
            .sign(RESOURCE_URL, Some(EXPIRES), &conditions(&[]))
            .unwrap();
        assert_eq!(
            signed,
            format!(
                "{}&x_ark_expires=1514764800&x_ark_signature=cLwtn96a-YPY7jt8ZKSf_Q",
                expected_prefix()
            )
        );
    }

    #[test]
    fn test_should_sign_identically_when_called_twice() {
        let signer = test_signer(false);
        let first = signer.sign(RESOURCE_URL, Some(EXPIRES), &conditions(&[])).unwrap();
        let second = signer.sign(RESOURCE_URL, Some(EXPIRES), &conditions(&[])).unwrap();
        assert_eq!(first, second);
        assert!(second.ends_with("x_ark_signature=cLwtn96a-YPY7jt8ZKSf_Q"));
    }

    #[test]
    fn test_should_sign_custom_method_without_query_marker() {
        let signed = test_signer(false)
            .sign(RESOURCE_URL, Some(EXPIRES), &conditions(&[("method", "HEAD")]))
            .unwrap();
        assert_eq!(
            signed,
            format!(
                "{}&x_ark_expires=1514764800&x_ark_signature=QULE8DQ08f8fhFC-1gDUWQ",
                expected_prefix()
            )
        );
    }

    #[test]
    fn test_should_sign_path_prefix() {
        let signed = test_signer(false)
            .sign(
                RESOURCE_URL,
                Some(EXPIRES),
                &conditions(&[("path_prefix", PATH_PREFIX)]),
            )
            .unwrap();
        assert_eq!(
            signed,
            format!(
                "{}&x_ark_expires=1514764800\
                 &x_ark_path_prefix=%2Fvideo-objects%2FQDuxJm02TYqJ%2F\
                 &x_ark_signature=334wInm0jKfC6LCm23zndA",
                expected_prefix()
            )
        );
    }

    #[test]
    fn test_should_sign_client_ip_with_either_separator() {
        let expected = format!(
            "{}&x_ark_client_ip=1&x_ark_expires=1514764800&x_ark_signature=Gr9T_ZdHDy8l8CCPxpFjNg",
            expected_prefix()
        );
        let signer = test_signer(false);

        for key in ["client_ip", "client-ip", "Client-IP"] {
            let signed = signer
                .sign(RESOURCE_URL, Some(EXPIRES), &conditions(&[(key, CLIENT_IP)]))
                .unwrap();
            assert_eq!(signed, expected, "key: {key}");
        }
    }

    #[test]
    fn test_should_sign_client_ip_and_user_agent() {
        let signed = test_signer(false)
            .sign(
                RESOURCE_URL,
                Some(EXPIRES),
                &conditions(&[("client_ip", CLIENT_IP), ("user_agent", USER_AGENT)]),
            )
            .unwrap();
        assert_eq!(
            signed,
            format!(
                "{}&x_ark_client_ip=1&x_ark_expires=1514764800\
                 &x_ark_signature=yYFkwZolbxCarOLHuKjD7w&x_ark_user_agent=1",
                expected_prefix()
            )
        );
        assert!(!signed.contains("Mozilla"));
    }

    #[test]
    fn test_should_sign_independent_of_condition_order() {
        let signer = test_signer(false);
        let forward = signer
            .sign(
                RESOURCE_URL,
                Some(EXPIRES),
                &conditions(&[("user_agent", USER_AGENT), ("client_ip", CLIENT_IP)]),
            )
            .unwrap();
        let backward = signer
            .sign(
                RESOURCE_URL,
                Some(EXPIRES),
                &conditions(&[("client_ip", CLIENT_IP), ("user_agent", USER_AGENT)]),
            )
            .unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_should_sign_client_ip_with_path_prefix() {
        let signed = test_signer(false)
            .sign(
                RESOURCE_URL,
                Some(EXPIRES),
                &conditions(&[("client-ip", CLIENT_IP), ("path_prefix", PATH_PREFIX)]),
            )
            .unwrap();
        assert_eq!(
            signed,
            format!(
                "{}&x_ark_client_ip=1&x_ark_expires=1514764800\
                 &x_ark_path_prefix=%2Fvideo-objects%2FQDuxJm02TYqJ%2F\
                 &x_ark_signature=2bkwVFSu6CzW7KmzXkwDbA",
                expected_prefix()
            )
        );
    }

    #[test]
    fn test_should_sign_client_ip_with_path_prefix_without_encoding() {
        let signed = test_signer(true)
            .sign(
                RESOURCE_URL,
                Some(EXPIRES),
                &conditions(&[("client-ip", CLIENT_IP), ("path_prefix", PATH_PREFIX)]),
            )
            .unwrap();
        assert_eq!(
            signed,
            format!(
                "{}&x_ark_client_ip=1&x_ark_expires=1514764800\
                 &x_ark_path_prefix=/video-objects/QDuxJm02TYqJ/\
                 &x_ark_signature=2bkwVFSu6CzW7KmzXkwDbA",
                expected_prefix()
            )
        );
    }

    #[test]
    fn test_should_sign_concurrently_without_shared_state() {
        let signer = test_signer(false);
        let expected = signer
            .sign(RESOURCE_URL, Some(EXPIRES), &conditions(&[("client_ip", CLIENT_IP)]))
            .unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let signer = &signer;
                    scope.spawn(move || {
                        // Interleave unrelated signatures between the checked ones.
                        let noise = format!("{RESOURCE_URL}?n={i}");
                        let _ = signer.sign(&noise, Some(EXPIRES + i), &conditions(&[]));
                        signer
                            .sign(
                                RESOURCE_URL,
                                Some(EXPIRES),
                                &conditions(&[("client_ip", CLIENT_IP)]),
                            )
                            .unwrap()
                    })
                })
                .collect();

            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
